//! Request schemas for every write endpoint, built once at startup.

use crate::server::{
    error::schema::SchemaError,
    pipeline::schema::{FieldRule, ItemKind, Schema},
};

/// Lowest and highest vote a user may cast on a comment.
pub const VOTE_RANGE: (i64, i64) = (-3, 3);

pub struct Schemas {
    pub signup: Schema,
    pub login: Schema,
    pub profile: Schema,
    pub message: Schema,
    pub message_update: Schema,
    pub category: Schema,
    pub category_update: Schema,
    pub article: Schema,
    pub article_update: Schema,
    pub comment: Schema,
    pub comment_update: Schema,
    /// Comment edits by moderators, who may also mark comments as read.
    pub comment_moderation: Schema,
    pub vote: Schema,
    pub project: Schema,
    pub project_update: Schema,
}

impl Schemas {
    /// Builds every schema.
    ///
    /// # Returns
    /// - `Ok(Schemas)` - All definitions are consistent
    /// - `Err(SchemaError)` - A definition is invalid; the server must not start
    pub fn load() -> Result<Self, SchemaError> {
        Ok(Self {
            signup: Schema::builder("signup")
                .field(FieldRule::string("name").required().max(120))
                .field(FieldRule::string("username").required().min(2).max(30))
                .field(FieldRule::string("email").required().email())
                .field(FieldRule::string("password").required())
                .field(
                    FieldRule::string("confirm_password")
                        .equals("password")
                        .strip(),
                )
                .build()?,
            login: Schema::builder("login")
                .field(FieldRule::string("email").required().email())
                .field(FieldRule::string("password").required())
                .build()?,
            profile: Schema::builder("profile")
                .field(FieldRule::string("name").max(120))
                .field(FieldRule::string("username").min(2).max(30))
                .field(FieldRule::string("email").email())
                .field(FieldRule::string("password").with("confirm_password"))
                .field(
                    FieldRule::string("confirm_password")
                        .equals("password")
                        .strip(),
                )
                .field(FieldRule::string("keywords").allow_empty())
                .field(FieldRule::string("summary").allow_empty())
                .field(FieldRule::string("info").allow_empty())
                .field(FieldRule::string("about").allow_empty())
                .field(FieldRule::asset("profile_pic"))
                .build()?,
            message: Schema::builder("message")
                .field(FieldRule::string("name").required().max(120))
                .field(FieldRule::string("subject").required().max(200))
                .field(FieldRule::string("email").required().email())
                .field(FieldRule::string("message").required())
                .build()?,
            message_update: Schema::builder("message_update")
                .field(FieldRule::string("reply"))
                .field(FieldRule::boolean("read"))
                .build()?,
            category: Schema::builder("category")
                .field(FieldRule::string("title").required().max(80))
                .field(FieldRule::string("description").allow_empty())
                .build()?,
            category_update: Schema::builder("category_update")
                .field(FieldRule::string("title").max(80))
                .field(FieldRule::string("description").allow_empty())
                .build()?,
            article: Schema::builder("article")
                .field(FieldRule::string("title").required().max(200))
                .field(FieldRule::string("summary").required())
                .field(FieldRule::string("content").required())
                .field(FieldRule::boolean("featured").default(false))
                .field(FieldRule::integer_list("categories").default(Vec::<i32>::new()))
                .field(FieldRule::asset("image"))
                .build()?,
            article_update: Schema::builder("article_update")
                .field(FieldRule::string("title").max(200))
                .field(FieldRule::string("summary"))
                .field(FieldRule::string("content"))
                .field(FieldRule::boolean("featured"))
                .field(FieldRule::set_action("categories", ItemKind::Integer))
                .field(FieldRule::asset("image"))
                .build()?,
            comment: Schema::builder("comment")
                .field(FieldRule::string("comment").required().max(5000))
                .field(FieldRule::integer("parent"))
                .build()?,
            comment_update: Schema::builder("comment_update")
                .field(FieldRule::string("comment").max(5000))
                .build()?,
            comment_moderation: Schema::builder("comment_moderation")
                .field(FieldRule::string("comment").max(5000))
                .field(FieldRule::boolean("read"))
                .build()?,
            vote: Schema::builder("vote")
                .field(
                    FieldRule::integer("vote")
                        .required()
                        .min(VOTE_RANGE.0)
                        .max(VOTE_RANGE.1),
                )
                .build()?,
            project: Schema::builder("project")
                .field(FieldRule::string("title").required().max(200))
                .field(FieldRule::string("summary").required())
                .field(FieldRule::string("link").required().url())
                .field(FieldRule::string_list("categories").default(Vec::<String>::new()))
                .field(FieldRule::boolean("published").default(false))
                .field(FieldRule::boolean("featured").default(false))
                .field(FieldRule::asset("image"))
                .build()?,
            project_update: Schema::builder("project_update")
                .field(FieldRule::string("title").max(200))
                .field(FieldRule::string("summary"))
                .field(FieldRule::string("link").url())
                .field(FieldRule::string_list("categories"))
                .field(FieldRule::boolean("published"))
                .field(FieldRule::boolean("featured"))
                .field(FieldRule::asset("image"))
                .build()?,
        })
    }
}
