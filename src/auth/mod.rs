/*!
 * # Authentication and Authorization Module
 *
 * Decides who may see which part of the dashboard.
 *
 * - `gate`: the access gate, a pure decision over an explicit session value
 * - `rbac`: the route table and the role-filtered sidebar built on the gate
 * - `session`: the simulated identity source (demo logins, in-process session)
 *
 * The gate never performs navigation and never reads session storage; the
 * routing layer feeds it a `Session` and acts on the returned `Decision`.
 */

mod gate;
mod rbac;
mod session;

pub use gate::*;
pub use rbac::*;
pub use session::*;
