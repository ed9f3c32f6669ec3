mod aggregate;
mod catalog;
mod repository;
mod value_objects;


pub use aggregate::{Badge, BadgeDefinition, BadgeFilter};
pub use catalog::BadgeCatalog;
pub use repository::BadgeRepository;
pub use value_objects::{BadgeCategory, BadgeCriteria, BadgeRarity, CriteriaType, Timeframe};
