//! Service modules for dataset preparation

pub mod dataset_builder;
pub mod entity_resolver;
pub mod entity_validator;
pub mod name_matcher;
pub mod person_reader;
pub mod wikidata_client;

pub use dataset_builder::{DatasetBuilder, PrepareStats, PreparedDataset};
pub use entity_resolver::{EntityMapping, EntityResolver, Lookup, ResolveError};
pub use entity_validator::{IdentifierValidator, NamespacedIdValidator};
pub use name_matcher::TextIndex;
pub use person_reader::{read_persons, PersonLoad, PersonRecord};
pub use wikidata_client::{EntitySearch, SearchError, SearchHit, WikidataClient};
