pub mod carousel;
pub mod cpf;
pub mod error;
pub mod record;
pub mod storage;
pub mod tracking;
pub mod view;

pub use carousel::*;
pub use error::*;
pub use record::*;
pub use view::*;
