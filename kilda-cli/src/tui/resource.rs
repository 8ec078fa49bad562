/// Remote data as seen by a view
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Resource<T> {
    #[default]
    NotAsked,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Resource<T> {
    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }
}

impl<T> From<Result<T, String>> for Resource<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Resource::Success(value),
            Err(err) => Resource::Failure(err),
        }
    }
}
