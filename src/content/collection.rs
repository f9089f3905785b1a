//! Post collection: every loaded post, keyed by slug

use std::cmp::Ordering;
use std::collections::HashMap;

use super::Post;
use crate::error::{Error, Result};

/// All posts of a site
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
}

/// Listing order: newest first, ties broken by slug
fn listing_order(a: &Post, b: &Post) -> Ordering {
    b.publish_date()
        .cmp(&a.publish_date())
        .then_with(|| a.slug().cmp(b.slug()))
}

impl PostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting duplicate slugs
    pub fn from_posts<I: IntoIterator<Item = Post>>(posts: I) -> Result<Self> {
        let mut collection = Self::new();
        for post in posts {
            collection.insert(post)?;
        }
        Ok(collection)
    }

    /// Add a post. Fails if its slug is already taken.
    pub fn insert(&mut self, post: Post) -> Result<()> {
        if let Some(&existing) = self.by_slug.get(post.slug()) {
            return Err(Error::DuplicateSlug {
                slug: post.slug().to_string(),
                first: self.posts[existing].source().to_string(),
                second: post.source().to_string(),
            });
        }
        self.by_slug.insert(post.slug().to_string(), self.posts.len());
        self.posts.push(post);
        Ok(())
    }

    /// Posts sorted by publish date, newest first.
    /// Drafts are left out unless `include_drafts` is set.
    pub fn list(&self, include_drafts: bool) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| include_drafts || !p.is_draft())
            .collect();
        posts.sort_by(|a, b| listing_order(a, b));
        posts
    }

    /// Look up a post by slug
    pub fn get(&self, slug: &str) -> Result<&Post> {
        self.by_slug
            .get(slug)
            .map(|&i| &self.posts[i])
            .ok_or_else(|| Error::NotFound(slug.to_string()))
    }

    pub fn get_mut(&mut self, slug: &str) -> Result<&mut Post> {
        match self.by_slug.get(slug) {
            Some(&i) => Ok(&mut self.posts[i]),
            None => Err(Error::NotFound(slug.to_string())),
        }
    }

    /// Publish the draft with the given slug
    pub fn publish(&mut self, slug: &str) -> Result<&Post> {
        let post = self.get_mut(slug)?;
        post.publish()?;
        Ok(&*post)
    }

    /// The published posts directly newer and older than `slug` in the
    /// public listing. Works for drafts too, by where they would sort.
    pub fn neighbors(&self, slug: &str) -> Result<(Option<&Post>, Option<&Post>)> {
        let post = self.get(slug)?;
        let listing = self.list(false);

        let newer = listing
            .iter()
            .take_while(|p| listing_order(p, post) == Ordering::Less)
            .last()
            .copied();
        let older = listing
            .iter()
            .find(|p| listing_order(p, post) == Ordering::Greater)
            .copied();

        Ok((newer, older))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, HeaderFormat};
    use chrono::NaiveDate;

    fn post(slug: &str, date: &str, draft: bool) -> Post {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let header = FrontMatter::new(slug.to_uppercase(), date, draft, HeaderFormat::Yaml);
        Post::new(slug, header, "")
    }

    fn sample() -> PostCollection {
        PostCollection::from_posts([
            post("ownership", "2024-05-21", false),
            post("iterators", "2024-11-20", true),
            post("traits", "2024-07-15", false),
        ])
        .unwrap()
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug().to_string()).collect()
    }

    #[test]
    fn test_list_public_excludes_drafts() {
        let collection = sample();
        let public = collection.list(false);
        assert_eq!(slugs(&public), vec!["traits", "ownership"]);
        assert!(public.iter().all(|p| !p.is_draft()));
        assert_eq!(public[0].publish_date().to_string(), "2024-07-15");
        assert_eq!(public[1].publish_date().to_string(), "2024-05-21");
    }

    #[test]
    fn test_list_with_drafts_is_everything_sorted() {
        let collection = sample();
        let all = collection.list(true);
        assert_eq!(all.len(), collection.len());
        assert_eq!(slugs(&all), vec!["iterators", "traits", "ownership"]);
        assert!(all
            .windows(2)
            .all(|w| w[0].publish_date() >= w[1].publish_date()));
    }

    #[test]
    fn test_list_empty() {
        let collection = PostCollection::new();
        assert!(collection.is_empty());
        assert!(collection.list(true).is_empty());
        assert!(collection.list(false).is_empty());
    }

    #[test]
    fn test_same_date_sorted_by_slug() {
        let collection = PostCollection::from_posts([
            post("b", "2024-01-01", false),
            post("a", "2024-01-01", false),
            post("c", "2024-01-01", false),
        ])
        .unwrap();
        assert_eq!(slugs(&collection.list(false)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_get() {
        let collection = sample();
        assert_eq!(collection.get("traits").unwrap().title(), "TRAITS");
        assert_eq!(collection.get("iterators").unwrap().slug(), "iterators");

        let err = collection.get("missing").unwrap_err();
        assert!(matches!(err, Error::NotFound(slug) if slug == "missing"));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let mut collection = sample();
        let err = collection
            .insert(post("traits", "2025-01-01", false))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug { slug, .. } if slug == "traits"));
        assert_eq!(collection.len(), 3);
        assert_eq!(
            collection.get("traits").unwrap().publish_date().to_string(),
            "2024-07-15"
        );
    }

    #[test]
    fn test_publish_moves_post_into_public_listing() {
        let mut collection = sample();
        collection.publish("iterators").unwrap();
        assert_eq!(
            slugs(&collection.list(false)),
            vec!["iterators", "traits", "ownership"]
        );

        let err = collection.publish("iterators").unwrap_err();
        assert!(matches!(err, Error::AlreadyPublished(_)));

        let err = collection.publish("nope").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_neighbors() {
        let collection = sample();

        let (newer, older) = collection.neighbors("traits").unwrap();
        assert!(newer.is_none());
        assert_eq!(older.unwrap().slug(), "ownership");

        let (newer, older) = collection.neighbors("ownership").unwrap();
        assert_eq!(newer.unwrap().slug(), "traits");
        assert!(older.is_none());

        // A draft sits where its date puts it
        let (newer, older) = collection.neighbors("iterators").unwrap();
        assert!(newer.is_none());
        assert_eq!(older.unwrap().slug(), "traits");

        assert!(collection.neighbors("missing").is_err());
    }
}
