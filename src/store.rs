use bson::doc;
use futures::TryStreamExt;
use mongodb::{options::FindOptions, Client, Collection};

use crate::schemas::{Expense, Group};

/// Read-only view over the groups and expenses the rest of the app writes.
#[derive(Clone, Debug)]
pub struct GroupStore {
    client: Client,
    database: String,
}

impl GroupStore {
    pub fn new(client: Client, database: impl Into<String>) -> Self {
        GroupStore {
            client,
            database: database.into(),
        }
    }

    fn groups(&self) -> Collection<Group> {
        self.client.database(&self.database).collection("Groups")
    }

    fn expenses(&self) -> Collection<Expense> {
        self.client.database(&self.database).collection("Expenses")
    }

    pub async fn find_group(&self, id: &str) -> mongodb::error::Result<Option<Group>> {
        self.groups().find_one(doc! { "id": id }, None).await
    }

    // Oldest first, the way the group screen lists them
    pub async fn find_expenses(&self, group_id: &str) -> mongodb::error::Result<Vec<Expense>> {
        let options = FindOptions::builder().sort(doc! { "createdAt": 1 }).build();
        let cursor = self
            .expenses()
            .find(doc! { "groupId": group_id }, options)
            .await?;
        cursor.try_collect().await
    }
}
