use crate::server::{
    data::article::ArticleRepository,
    model::{
        article::{ArticleFilter, CreateArticleParams},
        image::Image,
        page::Page,
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find;
mod save;

fn params(title: &str, slug: &str) -> CreateArticleParams {
    CreateArticleParams {
        title: title.to_string(),
        slug: slug.to_string(),
        image: None,
        summary: "Summary".to_string(),
        content: "Content".to_string(),
        featured: false,
        categories: Vec::new(),
        author: None,
    }
}
