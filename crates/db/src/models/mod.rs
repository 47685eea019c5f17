//! Entity rows and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Where the row is not returned as-is, the `Serialize` shapes handed
//!   back to clients (`*ToReturn`, `*ForList`)

pub mod attachment;
pub mod comment;
pub mod discussion;
pub mod entity_ref;
pub mod organization_type;
pub mod participant;
pub mod relation;
pub mod response;
pub mod user;
pub mod work_item;
