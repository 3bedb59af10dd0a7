//! Errors raised while building a scene.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("the message list is empty; a scene needs at least one message")]
    EmptyMessageList,
}
