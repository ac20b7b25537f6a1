//! Dashboard state and the flows that drive it.
//!
//! # Design
//! `Dashboard` owns every piece of UI state (active tab, status indicators,
//! both lists, both forms, notifications) and changes it only through the
//! methods below. Network calls go through the injected `Transport`; a
//! mutation never edits a list in place, it re-fetches the list afterwards.
//! Failures end as a notification or a list placeholder. Nothing retries.

use std::time::Instant;

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::{ApiError, CallError};
use crate::form::{ProductForm, UserForm};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::notify::{Level, Notifications};
use crate::types::{Product, User};
use crate::view::{ListView, StatusView, Tab, NO_PRODUCTS, NO_USERS, PRODUCTS_FAILED, USERS_FAILED};

/// Which collection a flow acts on; drives the wording of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    User,
    Product,
}

impl RecordKind {
    pub fn noun(self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Product => "product",
        }
    }

    fn title(self) -> &'static str {
        match self {
            RecordKind::User => "User",
            RecordKind::Product => "Product",
        }
    }

    pub fn confirm_prompt(self) -> String {
        format!("Are you sure you want to delete this {}?", self.noun())
    }
}

#[derive(Debug)]
pub struct Dashboard<T> {
    client: ApiClient,
    transport: T,
    pub tab: Tab,
    pub status: StatusView,
    pub users: ListView<User>,
    pub products: ListView<Product>,
    pub user_form: UserForm,
    pub product_form: ProductForm,
    pub notifications: Notifications,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport,
            tab: Tab::default(),
            status: StatusView::checking(),
            users: ListView::Loading,
            products: ListView::Loading,
            user_form: UserForm::default(),
            product_form: ProductForm::default(),
            notifications: Notifications::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Local only; no request is made.
    pub fn show_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn is_visible(&self, tab: Tab) -> bool {
        self.tab == tab
    }

    /// Initial load: health first, then both lists.
    pub fn load(&mut self) {
        self.refresh_health();
        self.refresh_users();
        self.refresh_products();
    }

    pub fn refresh_health(&mut self) {
        let request = self.client.build_health();
        self.status = match self.send(request, ApiClient::parse_health) {
            Ok(report) => StatusView::from_report(&report),
            Err(_) => StatusView::unreachable(),
        };
    }

    pub fn refresh_users(&mut self) {
        let request = self.client.build_list_users();
        self.users = match self.send(request, ApiClient::parse_list_users) {
            Ok(users) => ListView::from_items(users, NO_USERS),
            Err(_) => ListView::Failed(USERS_FAILED),
        };
    }

    pub fn refresh_products(&mut self) {
        let request = self.client.build_list_products();
        self.products = match self.send(request, ApiClient::parse_list_products) {
            Ok(products) => ListView::from_items(products, NO_PRODUCTS),
            Err(_) => ListView::Failed(PRODUCTS_FAILED),
        };
    }

    /// Submit the user form. Returns the level of the resulting notification.
    pub fn submit_user(&mut self, now: Instant) -> Level {
        let payload = match self.user_form.to_payload() {
            Ok(payload) => payload,
            Err(e) => return self.notify(Level::Error, e.to_string(), now),
        };
        let outcome = self
            .client
            .build_create_user(&payload)
            .map_err(CallError::from)
            .and_then(|request| self.send(request, ApiClient::parse_create_user));

        match outcome {
            Ok(_) => {
                self.user_form.reset();
                self.refresh_users();
                self.notify(Level::Success, added(RecordKind::User), now)
            }
            Err(e) => self.notify(Level::Error, add_failure(RecordKind::User, &e), now),
        }
    }

    /// Submit the product form. Returns the level of the resulting notification.
    pub fn submit_product(&mut self, now: Instant) -> Level {
        let payload = match self.product_form.to_payload() {
            Ok(payload) => payload,
            Err(e) => return self.notify(Level::Error, e.to_string(), now),
        };
        let outcome = self
            .client
            .build_create_product(&payload)
            .map_err(CallError::from)
            .and_then(|request| self.send(request, ApiClient::parse_create_product));

        match outcome {
            Ok(_) => {
                self.product_form.reset();
                self.refresh_products();
                self.notify(Level::Success, added(RecordKind::Product), now)
            }
            Err(e) => self.notify(Level::Error, add_failure(RecordKind::Product, &e), now),
        }
    }

    /// Delete after `confirm` approves the prompt. `None` when declined.
    pub fn delete_user(&mut self, id: Uuid, confirm: impl FnOnce(&str) -> bool, now: Instant) -> Option<Level> {
        if !confirm(&RecordKind::User.confirm_prompt()) {
            return None;
        }
        let request = self.client.build_delete_user(id);
        let outcome = self.send(request, ApiClient::parse_delete_user);
        Some(self.finish_delete(RecordKind::User, outcome, now))
    }

    pub fn delete_product(
        &mut self,
        id: Uuid,
        confirm: impl FnOnce(&str) -> bool,
        now: Instant,
    ) -> Option<Level> {
        if !confirm(&RecordKind::Product.confirm_prompt()) {
            return None;
        }
        let request = self.client.build_delete_product(id);
        let outcome = self.send(request, ApiClient::parse_delete_product);
        Some(self.finish_delete(RecordKind::Product, outcome, now))
    }

    pub fn tick(&mut self, now: Instant) {
        self.notifications.tick(now);
    }

    fn finish_delete(&mut self, kind: RecordKind, outcome: Result<(), CallError>, now: Instant) -> Level {
        match outcome {
            Ok(()) => {
                match kind {
                    RecordKind::User => self.refresh_users(),
                    RecordKind::Product => self.refresh_products(),
                }
                self.notify(Level::Success, format!("{} deleted successfully!", kind.title()), now)
            }
            Err(CallError::Transport(_)) => self.notify(
                Level::Error,
                format!("Error deleting {}. Please try again.", kind.noun()),
                now,
            ),
            Err(CallError::Api(_)) => self.notify(Level::Error, format!("Error deleting {}", kind.noun()), now),
        }
    }

    fn notify(&mut self, level: Level, message: String, now: Instant) -> Level {
        self.notifications.push(level, message, now);
        level
    }

    fn send<R>(
        &mut self,
        request: HttpRequest,
        parse: fn(&ApiClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, CallError> {
        let response = self.transport.execute(request)?;
        Ok(parse(&self.client, response)?)
    }
}

fn added(kind: RecordKind) -> String {
    format!("{} added successfully!", kind.title())
}

/// Server message when there is one, otherwise a generic line.
fn add_failure(kind: RecordKind, error: &CallError) -> String {
    match error {
        CallError::Transport(_) => format!("Error adding {}. Please try again.", kind.noun()),
        CallError::Api(e) => e
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Error adding {}", kind.noun())),
    }
}
