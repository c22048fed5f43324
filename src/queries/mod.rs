pub mod pagination;
pub mod product_query;

pub use pagination::{paginate, Page, PageRequest};
pub use product_query::{
    query, ProductFilter, ProductFilterParams, SortDirection, SortKey, StockStatusFilter,
};
