//! Side effects returned from `App::update`

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, Stream, StreamExt};
use std::future::Future;

/// Work for the runtime to carry out on behalf of an app
pub enum Command<Msg> {
    None,
    Batch(Vec<Command<Msg>>),
    /// Run a future and feed its result back as a message
    Perform(BoxFuture<'static, Msg>),
    /// Forward every item of a stream as a message until cancelled. A
    /// listener registered under a key that is already taken replaces it.
    Listen {
        key: String,
        stream: BoxStream<'static, Msg>,
    },
    /// Cancel the listener registered under a key
    Cancel(String),
    QuitSelf,
}

impl<Msg: Send + 'static> Command<Msg> {
    pub fn perform<T, F, M>(future: F, map: M) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        M: FnOnce(T) -> Msg + Send + 'static,
    {
        Command::Perform(future.map(map).boxed())
    }

    pub fn listen<S>(key: impl Into<String>, stream: S) -> Self
    where
        S: Stream<Item = Msg> + Send + 'static,
    {
        Command::Listen {
            key: key.into(),
            stream: stream.boxed(),
        }
    }

    pub fn cancel(key: impl Into<String>) -> Self {
        Command::Cancel(key.into())
    }

    pub fn batch(commands: Vec<Command<Msg>>) -> Self {
        Command::Batch(commands)
    }

    pub fn quit_self() -> Self {
        Command::QuitSelf
    }
}
