//! Pure data structures decoded from (and encoded for) the catalog service.

pub mod envelope;
pub mod page;
pub mod product;
pub mod seller;

pub use envelope::*;
pub use page::*;
pub use product::*;
pub use seller::*;
