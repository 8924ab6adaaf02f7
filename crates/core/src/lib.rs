pub mod config;
pub mod data;
pub mod error;
pub mod genealogy;
pub mod session;
pub mod types;
pub mod viz;

pub use config::TreeConfig;
pub use data::Record;
pub use error::{Result, TaromboError};
pub use genealogy::{FamilyTree, Lineage, PersonNode};
pub use session::{QueryOutcome, Session};
