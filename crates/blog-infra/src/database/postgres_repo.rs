//! PostgreSQL store: every unit of work is one database transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbConn, EntityTrait, ModelTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait, Unchanged,
};
use uuid::Uuid;

use blog_core::domain::{Comment, NewComment, NewPost, NewTag, Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, Store, TagRepository, UnitOfWork};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_favorite::{self, Entity as FavoriteEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::{delete_by_id, find_by_id, map_db_err};

/// PostgreSQL-backed [`Store`].
pub struct PostgresStore {
    db: DbConn,
}

impl PostgresStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(Box::new(PostgresUnitOfWork { txn }))
    }
}

/// An open transaction. Dropping it uncommitted rolls it back.
pub struct PostgresUnitOfWork {
    txn: DatabaseTransaction,
}

impl PostgresUnitOfWork {
    async fn load_post(&self, model: post::Model) -> Result<Post, RepoError> {
        let tags = model
            .find_related(TagEntity)
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        let favorites = FavoriteEntity::find()
            .filter(post_favorite::Column::PostId.eq(model.id))
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(model.into_domain(
            tags.into_iter().map(Into::into).collect(),
            favorites.into_iter().map(|f| f.user_id).collect(),
        ))
    }
}

#[async_trait]
impl TagRepository for PostgresUnitOfWork {
    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, RepoError> {
        let result = find_by_id::<TagEntity, _>(&self.txn, id).await?;
        Ok(result.map(Into::into))
    }

    async fn find_tags_by_slugs(&self, slugs: &[String]) -> Result<Vec<Tag>, RepoError> {
        tracing::debug!(?slugs, "Resolving tags by slug");

        let result = TagEntity::find()
            .filter(tag::Column::Slug.is_in(slugs.to_vec()))
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert_tag(&self, new: NewTag) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            slug: Set(new.slug),
        }
        .insert(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update_tag(&self, existing: &Tag) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel {
            id: Unchanged(existing.id),
            name: Set(existing.name.clone()),
            slug: Set(existing.slug.clone()),
        }
        .update(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_tag(&self, id: i64) -> Result<(), RepoError> {
        delete_by_id::<TagEntity, _>(&self.txn, id).await
    }
}

#[async_trait]
impl PostRepository for PostgresUnitOfWork {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, RepoError> {
        match find_by_id::<PostEntity, _>(&self.txn, id).await? {
            Some(model) => Ok(Some(self.load_post(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        match result {
            Some(model) => Ok(Some(self.load_post(model).await?)),
            None => Ok(None),
        }
    }

    async fn insert_post(&self, new: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new)
            .insert(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(model.into_domain(Vec::new(), Vec::new()))
    }

    async fn update_post(&self, existing: &Post) -> Result<(), RepoError> {
        post::ActiveModel {
            id: Unchanged(existing.id),
            title: Set(existing.title.clone()),
            slug: NotSet,
            content: Set(existing.content.clone()),
            author_id: NotSet,
            published_at: NotSet,
            updated_at: Set(existing.updated_at.into()),
        }
        .update(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn set_post_tags(&self, post_id: i64, tag_ids: &[i64]) -> Result<(), RepoError> {
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let links = tag_ids.iter().map(|&tag_id| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        });
        PostTagEntity::insert_many(links)
            .exec_without_returning(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn add_favorite(&self, post_id: i64, user_id: Uuid) -> Result<(), RepoError> {
        let favorite = post_favorite::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(user_id),
        };
        FavoriteEntity::insert(favorite)
            .exec_without_returning(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn remove_favorite(&self, post_id: i64, user_id: Uuid) -> Result<(), RepoError> {
        FavoriteEntity::delete_many()
            .filter(post_favorite::Column::PostId.eq(post_id))
            .filter(post_favorite::Column::UserId.eq(user_id))
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        // Comments, tag links and favorites go with it via ON DELETE CASCADE.
        delete_by_id::<PostEntity, _>(&self.txn, id).await
    }
}

#[async_trait]
impl CommentRepository for PostgresUnitOfWork {
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        let result = find_by_id::<CommentEntity, _>(&self.txn, id).await?;
        Ok(result.map(Into::into))
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::PublishedAt)
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert_comment(&self, new: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new)
            .insert(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update_comment(&self, existing: &Comment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel {
            id: Unchanged(existing.id),
            post_id: NotSet,
            user_id: NotSet,
            email: NotSet,
            comment: Set(existing.comment.clone()),
            approved: NotSet,
            published_at: NotSet,
        }
        .update(&self.txn)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_comment(&self, id: i64) -> Result<(), RepoError> {
        delete_by_id::<CommentEntity, _>(&self.txn, id).await
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let this = *self;
        this.txn.commit().await.map_err(map_db_err)
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        let this = *self;
        this.txn.rollback().await.map_err(map_db_err)
    }
}
