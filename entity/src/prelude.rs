pub use super::article::Entity as Article;
pub use super::article_category::Entity as ArticleCategory;
pub use super::category::Entity as Category;
pub use super::comment::Entity as Comment;
pub use super::comment_vote::Entity as CommentVote;
pub use super::message::Entity as Message;
pub use super::message_reply::Entity as MessageReply;
pub use super::project::Entity as Project;
pub use super::project_category::Entity as ProjectCategory;
pub use super::user::Entity as User;
pub use super::user_token::Entity as UserToken;
