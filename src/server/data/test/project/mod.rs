use crate::server::{
    data::{category::CategoryRepository, project::ProjectRepository},
    model::{
        page::Page,
        project::{CreateProjectParams, ProjectFilter},
    },
    pipeline::{mutator::FieldMutator, patch::Patch, record::Repository},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests creating a project with category titles.
///
/// Expected: Ok with sorted, deduplicated category ids, missing title created
#[tokio::test]
async fn creates_project_with_categories() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_category(db).await?;

    let repo = ProjectRepository::new(db);
    let project = repo
        .create(CreateProjectParams {
            title: "Folio".to_string(),
            summary: "This site".to_string(),
            link: "https://example.com".to_string(),
            image: None,
            categories: vec!["Tools".to_string(), first.title.clone(), "Tools".to_string()],
            published: true,
            featured: false,
        })
        .await?;

    let tools = CategoryRepository::new(db).find_by_title("Tools").await?.unwrap();
    let stored = repo.find_by_id(project.id).await?.unwrap();
    assert_eq!(stored.categories, vec![first.id, tools.id]);
    assert_eq!(stored, project);

    Ok(())
}

/// Tests filtering projects by published and featured flags.
///
/// Expected: only the published featured project
#[tokio::test]
async fn filters_published_and_featured() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_project(db).await?;
    factory::project::ProjectFactory::new(db)
        .published(true)
        .build()
        .await?;
    let both = factory::project::ProjectFactory::new(db)
        .published(true)
        .featured(true)
        .build()
        .await?;

    let repo = ProjectRepository::new(db);
    let (projects, total) = repo
        .find(
            ProjectFilter {
                published: Some(true),
                featured: Some(true),
            },
            Page::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(projects[0].id, both.id);

    Ok(())
}

/// Tests that saving replaces the category links.
///
/// Expected: only the new category linked
#[tokio::test]
async fn save_replaces_categories() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let old = factory::create_category(db).await?;
    let new = factory::create_category(db).await?;
    let model = factory::project::ProjectFactory::new(db)
        .category(old.id)
        .build()
        .await?;

    let repo = ProjectRepository::new(db);
    let project = repo.find_by_id(model.id).await?.unwrap();
    let patch = Patch::new()
        .set("categories", vec![new.id])
        .set("featured", true);

    let saved = repo.save(&FieldMutator::apply(&project, patch).unwrap()).await?;

    assert_eq!(saved.categories, vec![new.id]);
    assert!(saved.featured);

    Ok(())
}

/// Tests that a failed update discards categories created for its titles.
///
/// Expected: Err because the project row is gone, no "Orphan" category stored
#[tokio::test]
async fn failed_update_discards_new_categories() -> Result<(), DbErr> {
    use sea_orm::EntityTrait;

    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::create_project(db).await?;

    let repo = ProjectRepository::new(db);
    let project = repo.find_by_id(model.id).await?.unwrap();
    let mutation = FieldMutator::apply(&project, Patch::new().set("title", "Renamed")).unwrap();

    entity::prelude::Project::delete_by_id(model.id)
        .exec(db)
        .await?;

    let titles = ["Orphan".to_string()];
    assert!(repo.update(&mutation, Some(&titles)).await.is_err());
    assert!(CategoryRepository::new(db)
        .find_by_title("Orphan")
        .await?
        .is_none());

    Ok(())
}
