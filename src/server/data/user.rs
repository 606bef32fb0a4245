//! User data repository for database operations.
//!
//! A user aggregate is the `user` row plus its `user_token` rows.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde_json::Value;

use crate::server::{
    data::{group_by, set_if},
    model::{
        image::Image,
        page::Page,
        user::{CreateUserParams, Role, User, UserFilter},
    },
    pipeline::{
        mutator::{ItemChange, Mutation},
        record::Repository,
    },
};

/// Repository providing database operations for users and their session tokens.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user without tokens.
    ///
    /// # Returns
    /// - `Ok(User)` - The stored user
    /// - `Err(DbErr)` - Insert failed, including unique violations on username or email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            name: ActiveValue::Set(params.name),
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            password: ActiveValue::Set(params.password_hash),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            verified: ActiveValue::Set(false),
            keywords: ActiveValue::Set(None),
            summary: ActiveValue::Set(None),
            info: ActiveValue::Set(None),
            about: ActiveValue::Set(None),
            profile_pic_path: ActiveValue::Set(None),
            profile_pic_width: ActiveValue::Set(None),
            profile_pic_height: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity, Vec::new()))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(Some(hydrate(self.db, entity).await?))
    }

    /// Finds a user by email, compared exactly as stored.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        match entity {
            Some(entity) => Ok(Some(hydrate(self.db, entity).await?)),
            None => Ok(None),
        }
    }

    /// Finds the user owning a bearer token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, DbErr> {
        let Some(row) = entity::prelude::UserToken::find()
            .filter(entity::user_token::Column::Token.eq(token))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        self.find_by_id(row.user_id).await
    }

    /// Gets one page of users ordered by name.
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users of the requested page and the number of matching users
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn find(&self, filter: UserFilter, page: Page) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find();
        if let Some(role) = filter.role {
            query = query.filter(entity::user::Column::Role.eq(role.as_str()));
        }

        let paginator = query
            .order_by_asc(entity::user::Column::Name)
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, page.size());

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        Ok((hydrate_all(self.db, entities).await?, total))
    }

    /// Commits a user mutation in one transaction.
    ///
    /// Changed columns are written and `updated_at` is set to now. Token edits are
    /// applied one row at a time: an added token already stored is kept once and a
    /// removed token that is already gone is skipped.
    ///
    /// # Returns
    /// - `Ok(User)` - The user as committed, with every stored token
    /// - `Err(DbErr)` - Write failed; nothing is committed
    pub async fn save(&self, mutation: &Mutation<User>) -> Result<User, DbErr> {
        let user = &mutation.record;
        let txn = self.db.begin().await?;

        let (path, width, height) = Image::into_columns(user.profile_pic.clone());
        let entity = entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            name: set_if(mutation, "name", user.name.clone()),
            username: set_if(mutation, "username", user.username.clone()),
            email: set_if(mutation, "email", user.email.clone()),
            password: set_if(mutation, "password", user.password.clone()),
            keywords: set_if(mutation, "keywords", user.keywords.clone()),
            summary: set_if(mutation, "summary", user.summary.clone()),
            info: set_if(mutation, "info", user.info.clone()),
            about: set_if(mutation, "about", user.about.clone()),
            profile_pic_path: set_if(mutation, "profile_pic", path),
            profile_pic_width: set_if(mutation, "profile_pic", width),
            profile_pic_height: set_if(mutation, "profile_pic", height),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        for change in mutation.items_of("tokens") {
            match change {
                ItemChange::Added(Value::String(token)) => add_token(&txn, user.id, token).await?,
                ItemChange::Removed(Value::String(token)) => {
                    entity::prelude::UserToken::delete_many()
                        .filter(entity::user_token::Column::UserId.eq(user.id))
                        .filter(entity::user_token::Column::Token.eq(token.as_str()))
                        .exec(&txn)
                        .await?;
                }
                ItemChange::Replaced(tokens) => {
                    entity::prelude::UserToken::delete_many()
                        .filter(entity::user_token::Column::UserId.eq(user.id))
                        .exec(&txn)
                        .await?;
                    for token in tokens.iter().filter_map(Value::as_str) {
                        add_token(&txn, user.id, token).await?;
                    }
                }
                other => tracing::debug!("Ignoring token edit {:?} for user {}", other, user.id),
            }
        }

        let user = hydrate(&txn, entity).await?;
        txn.commit().await?;

        Ok(user)
    }

    /// Deletes a user; tokens cascade, authored articles and comments keep a null author.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The deleted user
    /// - `Ok(None)` - No user with that id
    pub async fn delete(&self, id: i32) -> Result<Option<User>, DbErr> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(Some(user))
    }

    /// Sets the role of the user with `email`.
    ///
    /// # Returns
    /// - `Ok(true)` - A user was updated
    /// - `Ok(false)` - No user has that email
    pub async fn set_role_by_email(&self, email: &str, role: Role) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::Email.eq(email))
            .col_expr(
                entity::user::Column::Role,
                sea_orm::sea_query::Expr::value(role.as_str()),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Sets the verified flag of a user.
    pub async fn set_verified(&self, id: i32, verified: bool) -> Result<Option<User>, DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::Verified,
                sea_orm::sea_query::Expr::value(verified),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        self.find_by_id(id).await
    }
}

#[async_trait]
impl Repository for UserRepository<'_> {
    type Record = User;

    async fn find_one(&self, id: i32) -> Result<Option<User>, DbErr> {
        self.find_by_id(id).await
    }

    async fn save(&self, mutation: &Mutation<User>) -> Result<User, DbErr> {
        UserRepository::save(self, mutation).await
    }

    async fn delete_one(&self, id: i32) -> Result<Option<User>, DbErr> {
        self.delete(id).await
    }
}

/// Inserts a token for `user_id`; a token that is already stored is left as it is.
async fn add_token<C: ConnectionTrait>(conn: &C, user_id: i32, token: &str) -> Result<(), DbErr> {
    entity::prelude::UserToken::insert(entity::user_token::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        token: ActiveValue::Set(token.to_string()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(entity::user_token::Column::Token)
            .do_nothing()
            .to_owned(),
    )
    .do_nothing()
    .exec(conn)
    .await?;

    Ok(())
}

async fn hydrate<C: ConnectionTrait>(conn: &C, entity: entity::user::Model) -> Result<User, DbErr> {
    let tokens = entity::prelude::UserToken::find()
        .filter(entity::user_token::Column::UserId.eq(entity.id))
        .order_by_asc(entity::user_token::Column::Id)
        .all(conn)
        .await?;

    Ok(User::from_entity(entity, tokens))
}

async fn hydrate_all<C: ConnectionTrait>(
    conn: &C,
    entities: Vec<entity::user::Model>,
) -> Result<Vec<User>, DbErr> {
    let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();
    let tokens = entity::prelude::UserToken::find()
        .filter(entity::user_token::Column::UserId.is_in(ids))
        .order_by_asc(entity::user_token::Column::Id)
        .all(conn)
        .await?;
    let mut tokens = group_by(tokens, |t| t.user_id);

    Ok(entities
        .into_iter()
        .map(|e| {
            let own = tokens.remove(&e.id).unwrap_or_default();
            User::from_entity(e, own)
        })
        .collect())
}
