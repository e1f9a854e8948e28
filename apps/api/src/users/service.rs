use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use trellis_core::{Arguments, ClassRegistrar, Component, CoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
}

/// In-memory user list shared by every request
#[derive(Debug)]
pub struct UsersService {
    users: Mutex<Vec<User>>,
}

impl UsersService {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(vec![User {
                id: 1,
                name: "John Doe".to_string(),
            }]),
        }
    }

    pub async fn find_all(&self) -> Vec<User> {
        self.users.lock().await.clone()
    }

    /// Ids follow the list length, so they stay sequential as long as nothing is removed
    pub async fn create(&self, name: impl Into<String>) -> User {
        let mut users = self.users.lock().await;
        let user = User {
            id: users.len() as u64 + 1,
            name: name.into(),
        };
        users.push(user.clone());
        user
    }
}

impl Default for UsersService {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for UsersService {
    fn declare(class: &mut ClassRegistrar<'_>) {
        class.injectable();
    }

    fn construct(_args: &Arguments) -> Result<Self, CoreError> {
        Ok(Self::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_and_sequential_ids() {
        let service = UsersService::new();
        assert_eq!(service.find_all().await.len(), 1);

        let jane = service.create("Jane").await;
        let joe = service.create("Joe").await;
        assert_eq!((jane.id, joe.id), (2, 3));
        assert_eq!(
            service.find_all().await.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
            vec!["John Doe", "Jane", "Joe"]
        );
    }
}
