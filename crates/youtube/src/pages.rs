//! Bounded page-by-page comment retrieval.

use tracing::{debug, info};

use crate::{CommentSource, YoutubeError};

/// Iterator over batches of comment text for one video.
///
/// Each item is one API page with the uploader's own comments removed.
/// Iteration stops after the page that reaches the cap, when the API stops
/// returning a page token, or right after the first error.
pub struct CommentPages<'a, S: ?Sized> {
    source: &'a S,
    video_id: &'a str,
    owner_channel_id: &'a str,
    remaining: usize,
    next_token: Option<String>,
    pages: usize,
    done: bool,
}

impl<'a, S: CommentSource + ?Sized> CommentPages<'a, S> {
    pub fn new(source: &'a S, video_id: &'a str, owner_channel_id: &'a str, max_comments: usize) -> Self {
        Self {
            source,
            video_id,
            owner_channel_id,
            remaining: max_comments,
            next_token: None,
            pages: 0,
            done: max_comments == 0,
        }
    }
}

impl<S: CommentSource + ?Sized> Iterator for CommentPages<'_, S> {
    type Item = Result<Vec<String>, YoutubeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let page = match self
            .source
            .comment_page(self.video_id, self.next_token.as_deref())
        {
            Ok(page) => page,
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };
        self.pages += 1;

        let fetched = page.comments.len();
        let mut batch: Vec<String> = page
            .comments
            .into_iter()
            .filter(|comment| comment.author_channel_id.as_deref() != Some(self.owner_channel_id))
            .map(|comment| comment.text)
            .collect();
        batch.truncate(self.remaining);
        self.remaining -= batch.len();

        debug!(
            page = self.pages,
            fetched,
            kept = batch.len(),
            remaining = self.remaining,
            "fetched comment page"
        );

        self.next_token = page.next_page_token;
        if self.remaining == 0 || self.next_token.is_none() {
            self.done = true;
        }

        Some(Ok(batch))
    }
}

/// Collect up to `max_comments` comments, skipping the uploader's own.
pub fn fetch_comments<S: CommentSource + ?Sized>(
    source: &S,
    video_id: &str,
    owner_channel_id: &str,
    max_comments: usize,
) -> Result<Vec<String>, YoutubeError> {
    let mut comments = Vec::new();
    for batch in CommentPages::new(source, video_id, owner_channel_id, max_comments) {
        comments.extend(batch?);
    }
    info!(video_id, count = comments.len(), "fetched comments");
    Ok(comments)
}
