//! Collection and index definitions for the authentication database.

use bson::doc;
use mongodb::IndexModel;
use mongodb::options::IndexOptions;

/// Collection holding one document per account.
pub const USER_COLLECTION: &str = "user";

/// Name the server assigns to an ascending index on `username`.
pub const USERNAME_INDEX: &str = "username_1";

/// Unique ascending index on `username`; the server rejects a second
/// document with the same username (error code 11000).
pub fn username_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "username": 1 })
        .options(
            IndexOptions::builder()
                .name(USERNAME_INDEX.to_string())
                .unique(true)
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_index_is_unique_and_ascending() {
        let model = username_index();
        assert_eq!(model.keys, doc! { "username": 1 });
        let opts = model.options.expect("index options");
        assert_eq!(opts.unique, Some(true));
        assert_eq!(opts.name.as_deref(), Some(USERNAME_INDEX));
    }
}
