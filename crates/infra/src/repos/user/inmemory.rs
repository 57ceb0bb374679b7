use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use agenda_domain::{User, ID};
use std::sync::Mutex;

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        Ok(find_many(user_ids, &self.users))
    }
}
