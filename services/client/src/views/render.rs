//! Plain-text printers for the CLI.

use forum_client_core::comment_tree::CommentTree;
use forum_client_core::domain::{Notification, Post};
use forum_client_core::session::SessionContext;

const INDENT: &str = "    ";

/// One line per comment, indented by depth, in pre-order.
///
/// `[#id]` marks comments that can be replied to, `(#id)` those that cannot.
/// Comments by the logged-in user carry a `*`.
pub fn render_tree(tree: &CommentTree, session: &SessionContext) -> String {
    let mut out = String::new();
    for node in tree.walk() {
        let comment = &node.comment;
        let id = if node.can_reply() {
            format!("[#{}]", comment.id)
        } else {
            format!("(#{})", comment.id)
        };
        let mine = if session.is_owner(comment) { "*" } else { "" };
        out.push_str(&format!(
            "{}{} {}{}: {}\n",
            INDENT.repeat(node.depth),
            id,
            comment.creator.username,
            mine,
            comment.content.replace('\n', " ")
        ));
    }
    out
}

pub fn render_post_header(post: &Post) -> String {
    format!(
        "{} [{:+}] by {} (#{})\n{}\n",
        post.title, post.vote_count, post.creator.username, post.id, post.content
    )
}

/// `•` marks unread entries; the linked post, if any, goes last.
pub fn render_notification(notification: &Notification) -> String {
    let marker = if notification.is_read { " " } else { "•" };
    let mut line = format!(
        "{} #{} {} ({})",
        marker,
        notification.id,
        notification.summary(),
        notification.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(post_id) = notification.target_post_id() {
        line.push_str(&format!(" -> post #{}", post_id));
    }
    line
}
