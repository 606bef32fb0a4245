mod article;
mod category;
mod comment;
mod message;
mod project;
mod user;
