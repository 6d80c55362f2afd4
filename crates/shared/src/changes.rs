use std::collections::BTreeMap;

use crate::models::{ChangeRecord, ChangeType, Post};

/// Diff the current fetch against the previous run's state.
///
/// A post whose id is absent from the previous state is new; a post whose
/// stored modified timestamp differs is updated; an identical timestamp
/// produces nothing. Output order follows input order.
pub fn detect_changes(
    previous_state: &BTreeMap<String, String>,
    posts: &[Post],
) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();
    for post in posts {
        match previous_state.get(&post.id) {
            None => changes.push(ChangeRecord {
                post: post.clone(),
                change_type: ChangeType::New,
            }),
            Some(previous_modified) if previous_modified != &post.modified => {
                changes.push(ChangeRecord {
                    post: post.clone(),
                    change_type: ChangeType::Updated,
                })
            }
            Some(_) => {}
        }
    }
    changes
}

/// The state snapshot to persist after a run: exactly the fetched posts'
/// ids mapped to their current modified values. Ids that disappeared from
/// the fetch drop out of state.
pub fn snapshot_state(posts: &[Post]) -> BTreeMap<String, String> {
    posts
        .iter()
        .map(|post| (post.id.clone(), post.modified.clone()))
        .collect()
}
