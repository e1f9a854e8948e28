//! Route table construction and lookup

pub mod builder;
pub mod table;

pub use builder::RouteTableBuilder;
pub use table::{RouteEntry, RouteInfo, RouteTable};
