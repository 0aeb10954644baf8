/// Concrete matchers
///
/// Every router here implements [`crate::Matcher`], so any of them can be
/// registered as a node inside any other.

pub mod key;
pub mod method;
pub mod path;
pub mod unit;

pub use key::KeyRouter;
pub use method::MethodRouter;
pub use path::PathRouter;
pub use unit::UnitRouter;
