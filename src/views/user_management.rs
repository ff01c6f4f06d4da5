use std::sync::Arc;

use tokio::sync::watch;

use crate::forms::user_form::UserForm;
use crate::models::user::User;
use crate::models::ResourceId;
use crate::services::notification_service::Notifier;
use crate::services::user_service::UserService;
use crate::views::busy::Busy;
use crate::views::listing::{ListSpec, ListView};

pub struct UserListing;

impl ListSpec for UserListing {
    type Item = User;
    type Filter = ();
    type Sort = ();

    fn search_fields(item: &User) -> Vec<Option<&str>> {
        vec![
            Some(item.full_name.as_str()),
            Some(item.email.as_str()),
            item.role.map(|r| r.as_str()),
        ]
    }
}

/// Admin user CRUD. Every successful mutation is followed by a refetch.
pub struct UserManagement {
    service: UserService,
    notifier: Arc<dyn Notifier>,
    list: ListView<UserListing>,
    loading: Busy,
}

impl UserManagement {
    pub fn new(service: UserService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            list: ListView::new(),
            loading: Busy::new(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let _loading = self.loading.begin();
        match self.service.list().await {
            Ok(users) => {
                self.list.set_items(users);
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to load users");
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Follows the loading flag while a fetch is awaited.
    pub fn loading_events(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.list.set_search(search);
    }

    pub fn visible(&self) -> Vec<&User> {
        self.list.visible().collect()
    }

    pub fn find(&self, id: &ResourceId) -> Option<&User> {
        self.list.items().iter().find(|u| &u.id == id)
    }

    pub async fn save(&mut self, form: &UserForm) -> bool {
        let editing = !form.mode.is_create();
        match form.submit(&self.service).await {
            Ok(()) => {
                self.notifier.success(if editing {
                    "User updated successfully"
                } else {
                    "User created successfully"
                });
                self.load().await;
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to save user");
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &ResourceId) -> bool {
        match self.service.delete(id).await {
            Ok(()) => {
                self.notifier.success("User deleted successfully");
                self.load().await;
                true
            }
            Err(e) => {
                self.notifier.failure(&e, "Failed to delete user");
                false
            }
        }
    }
}
