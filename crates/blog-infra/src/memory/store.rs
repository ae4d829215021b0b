//! In-memory store with transactional units of work.
//!
//! A unit of work holds the store lock for its whole lifetime and edits a
//! private copy of the tables. Commit swaps the copy in; drop discards it.
//! Units of work are therefore fully serialized.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use blog_core::domain::{Comment, NewComment, NewPost, NewTag, Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, Store, TagRepository, UnitOfWork};

#[derive(Debug, Clone, Default)]
struct Tables {
    tags: BTreeMap<i64, Tag>,
    /// Posts are stored without tags or favorites; those live in the join sets.
    posts: BTreeMap<i64, Post>,
    post_tags: BTreeSet<(i64, i64)>,
    favorites: BTreeSet<(i64, Uuid)>,
    comments: BTreeMap<i64, Comment>,
    last_tag_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

impl Tables {
    fn assemble(&self, stored: &Post) -> Post {
        let post_id = stored.id;
        let mut post = stored.clone();
        post.set_tags(
            self.post_tags
                .iter()
                .filter(|(p, _)| *p == post_id)
                .filter_map(|(_, t)| self.tags.get(t).cloned())
                .collect(),
        );
        post.favorites = self
            .favorites
            .iter()
            .filter(|(p, _)| *p == post_id)
            .map(|(_, u)| *u)
            .collect();
        post
    }

    fn tag_taken(&self, name: &str, slug: &str, except: Option<i64>) -> bool {
        self.tags
            .values()
            .filter(|t| Some(t.id) != except)
            .any(|t| t.name == name || t.slug == slug)
    }

    fn post_taken(&self, title: &str, slug: &str, except: Option<i64>) -> bool {
        self.posts
            .values()
            .filter(|p| Some(p.id) != except)
            .any(|p| p.title == title || p.slug == slug)
    }

    fn require_post(&self, post_id: i64) -> Result<(), RepoError> {
        if self.posts.contains_key(&post_id) {
            Ok(())
        } else {
            Err(RepoError::MissingReference(format!("post {post_id}")))
        }
    }
}

/// Process-local store. Data is lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepoError> {
        let committed = self.tables.clone().lock_owned().await;
        let working = committed.clone();
        Ok(Box::new(InMemoryUnitOfWork {
            committed,
            working: Mutex::new(working),
        }))
    }
}

struct InMemoryUnitOfWork {
    committed: OwnedMutexGuard<Tables>,
    working: Mutex<Tables>,
}

#[async_trait]
impl TagRepository for InMemoryUnitOfWork {
    async fn find_tag(&self, id: i64) -> Result<Option<Tag>, RepoError> {
        Ok(self.working.lock().await.tags.get(&id).cloned())
    }

    async fn find_tags_by_slugs(&self, slugs: &[String]) -> Result<Vec<Tag>, RepoError> {
        let tables = self.working.lock().await;
        Ok(tables
            .tags
            .values()
            .filter(|t| slugs.contains(&t.slug))
            .cloned()
            .collect())
    }

    async fn insert_tag(&self, new: NewTag) -> Result<Tag, RepoError> {
        let mut tables = self.working.lock().await;
        if tables.tag_taken(&new.name, &new.slug, None) {
            return Err(RepoError::Constraint(
                "duplicate value: tag name or slug".to_string(),
            ));
        }

        tables.last_tag_id += 1;
        let tag = Tag {
            id: tables.last_tag_id,
            name: new.name,
            slug: new.slug,
        };
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, tag: &Tag) -> Result<Tag, RepoError> {
        let mut tables = self.working.lock().await;
        if !tables.tags.contains_key(&tag.id) {
            return Err(RepoError::NotFound);
        }
        if tables.tag_taken(&tag.name, &tag.slug, Some(tag.id)) {
            return Err(RepoError::Constraint(
                "duplicate value: tag name or slug".to_string(),
            ));
        }

        tables.tags.insert(tag.id, tag.clone());
        Ok(tag.clone())
    }

    async fn delete_tag(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.working.lock().await;
        if tables.tags.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.post_tags.retain(|(_, tag_id)| *tag_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryUnitOfWork {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let tables = self.working.lock().await;
        Ok(tables.posts.get(&id).map(|p| tables.assemble(p)))
    }

    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let tables = self.working.lock().await;
        Ok(tables
            .posts
            .values()
            .find(|p| p.slug == slug)
            .map(|p| tables.assemble(p)))
    }

    async fn insert_post(&self, new: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.working.lock().await;
        if tables.post_taken(&new.title, &new.slug, None) {
            return Err(RepoError::Constraint(
                "duplicate value: post title or slug".to_string(),
            ));
        }

        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            title: new.title,
            slug: new.slug,
            content: new.content,
            author_id: new.author_id,
            tags: Vec::new(),
            favorites: Vec::new(),
            published_at: new.published_at,
            updated_at: new.updated_at,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, post: &Post) -> Result<(), RepoError> {
        let mut tables = self.working.lock().await;
        if tables.post_taken(&post.title, &post.slug, Some(post.id)) {
            return Err(RepoError::Constraint(
                "duplicate value: post title or slug".to_string(),
            ));
        }

        let stored = tables.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        stored.title = post.title.clone();
        stored.content = post.content.clone();
        stored.updated_at = post.updated_at;
        Ok(())
    }

    async fn set_post_tags(&self, post_id: i64, tag_ids: &[i64]) -> Result<(), RepoError> {
        let mut tables = self.working.lock().await;
        tables.require_post(post_id)?;
        if let Some(missing) = tag_ids.iter().find(|id| !tables.tags.contains_key(*id)) {
            return Err(RepoError::MissingReference(format!("tag {missing}")));
        }

        tables.post_tags.retain(|(p, _)| *p != post_id);
        for &tag_id in tag_ids {
            tables.post_tags.insert((post_id, tag_id));
        }
        Ok(())
    }

    async fn add_favorite(&self, post_id: i64, user_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.working.lock().await;
        tables.require_post(post_id)?;
        if !tables.favorites.insert((post_id, user_id)) {
            return Err(RepoError::Constraint(
                "duplicate value: favorite".to_string(),
            ));
        }
        Ok(())
    }

    async fn remove_favorite(&self, post_id: i64, user_id: Uuid) -> Result<(), RepoError> {
        self.working
            .lock()
            .await
            .favorites
            .remove(&(post_id, user_id));
        Ok(())
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.working.lock().await;
        if tables.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.comments.retain(|_, c| c.post_id != id);
        tables.post_tags.retain(|(p, _)| *p != id);
        tables.favorites.retain(|(p, _)| *p != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryUnitOfWork {
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.working.lock().await.comments.get(&id).cloned())
    }

    async fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let tables = self.working.lock().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn insert_comment(&self, new: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.working.lock().await;
        tables.require_post(new.post_id)?;

        tables.last_comment_id += 1;
        let comment = Comment {
            id: tables.last_comment_id,
            post_id: new.post_id,
            user_id: new.user_id,
            email: new.email,
            comment: new.comment,
            approved: new.approved,
            published_at: new.published_at,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<Comment, RepoError> {
        let mut tables = self.working.lock().await;
        let stored = tables
            .comments
            .get_mut(&comment.id)
            .ok_or(RepoError::NotFound)?;
        stored.comment = comment.comment.clone();
        Ok(stored.clone())
    }

    async fn delete_comment(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.working.lock().await;
        tables
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let this = *self;
        let mut committed = this.committed;
        *committed = this.working.into_inner();
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        Ok(())
    }
}
