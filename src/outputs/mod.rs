//! Output generation for the static-site post files.
//!
//! The pipeline's only durable artifact is one markdown post per date,
//! written by [`post`]. The renderer that turns posts into pages lives
//! outside this crate; we only produce the document it consumes.

pub mod post;
