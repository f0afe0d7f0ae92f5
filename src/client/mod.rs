// Client state & fetch layer: the non-presentational half of the browser
// client (store slices, session persistence, data fetching, feed filtering).
pub mod http;
pub mod state;

pub use http::*;
pub use state::*;
