//! Entity models of the controller API
//!
//! Each model is a plain serde struct using the controller's field names.
//! Empty strings are left out of request bodies; booleans are always sent.

/// Implement [`RestEntity`](crate::entity::RestEntity) for a model with an
/// `id` field.
macro_rules! impl_rest_entity {
    (@impl $model:ty, $name:literal, $category:literal, $root:literal) => {
        impl $crate::entity::RestEntity for $model {
            const IDENTITY: $crate::identity::Identity =
                $crate::identity::Identity::new($name, $category);

            fn identifier(&self) -> &str {
                &self.id
            }

            fn set_identifier(&mut self, id: String) {
                self.id = id;
            }

            fn is_root(&self) -> bool {
                $root
            }
        }
    };
    (root $model:ty, $name:literal, $category:literal) => {
        impl_rest_entity!(@impl $model, $name, $category, true);
    };
    ($model:ty, $name:literal, $category:literal) => {
        impl_rest_entity!(@impl $model, $name, $category, false);
    };
}

/// Typed children accessors: `list` fetches, `create` adds one.
macro_rules! impl_children {
    ($parent:ty { $($list:ident, $create:ident => $child:ty;)* }) => {
        impl $parent {
            $(
                pub async fn $list(
                    &self,
                    info: Option<&mut $crate::fetching::FetchingInfo>,
                ) -> $crate::error::Result<Vec<$child>> {
                    $crate::entity::fetch_children(self, info).await
                }

                pub async fn $create(&self, child: &mut $child) -> $crate::error::Result<()> {
                    $crate::entity::create_child(self, child).await
                }
            )*
        }
    };
}

mod enterprise;
mod event_log;
mod global_metadata;
mod me;
mod metadata;
mod metadata_tag;

pub use enterprise::Enterprise;
pub use event_log::EventLog;
pub use global_metadata::GlobalMetadata;
pub use me::Me;
pub use metadata::Metadata;
pub use metadata_tag::MetadataTag;
