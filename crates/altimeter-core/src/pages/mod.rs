pub mod altimeter;
pub mod constants;
pub mod page;

pub use altimeter::AltimeterPage;
pub use page::Page;
