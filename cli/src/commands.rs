//! Subcommands. Each one runs a dashboard flow and prints the resulting state.
//! Returns whether the command succeeded.

use std::time::Instant;

use anyhow::Result;
use clap::Subcommand;
use crud_core::{ApiClient, Dashboard, Level, ListView, RecordKind, Transport};
use dialoguer::Confirm;
use uuid::Uuid;

use crate::output;
use crate::transport::UreqTransport;

pub type Dash = Dashboard<UreqTransport>;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List,

    /// Add a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Leave out to keep unset
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },

    /// Delete a user by ID
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List all products
    List,

    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Mark the product as out of stock
        #[arg(long)]
        out_of_stock: bool,
    },

    /// Delete a product by ID
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn dashboard(api_url: &str) -> Dash {
    Dashboard::new(ApiClient::new(api_url), UreqTransport::new())
}

pub fn status<T: Transport>(dash: &mut Dashboard<T>) -> Result<bool> {
    dash.refresh_health();
    output::status(&dash.status);
    Ok(dash.status.backend.ok)
}

pub fn overview<T: Transport>(dash: &mut Dashboard<T>) -> Result<bool> {
    dash.load();
    output::status(&dash.status);
    println!("\nUsers");
    output::users(&dash.users);
    println!("\nProducts");
    output::products(&dash.products);
    Ok(dash.status.backend.ok)
}

/// `confirm` is only asked when deleting without `--yes`.
pub fn users<T: Transport>(
    dash: &mut Dashboard<T>,
    command: UserCommands,
    confirm: impl FnOnce(RecordKind) -> Result<bool>,
) -> Result<bool> {
    match command {
        UserCommands::List => {
            dash.refresh_users();
            output::users(&dash.users);
            Ok(!matches!(dash.users, ListView::Failed(_)))
        }
        UserCommands::Add { name, email, age, city } => {
            dash.user_form.name = name;
            dash.user_form.email = email;
            dash.user_form.age = age.unwrap_or_default();
            dash.user_form.city = city.unwrap_or_default();

            let level = dash.submit_user(Instant::now());
            report(dash);
            if level == Level::Success {
                output::users(&dash.users);
            }
            Ok(level == Level::Success)
        }
        UserCommands::Delete { id, yes } => {
            let confirmed = yes || confirm(RecordKind::User)?;
            match dash.delete_user(id, |_| confirmed, Instant::now()) {
                Some(level) => {
                    report(dash);
                    Ok(level == Level::Success)
                }
                None => {
                    output::muted("Cancelled");
                    Ok(true)
                }
            }
        }
    }
}

pub fn products<T: Transport>(
    dash: &mut Dashboard<T>,
    command: ProductCommands,
    confirm: impl FnOnce(RecordKind) -> Result<bool>,
) -> Result<bool> {
    match command {
        ProductCommands::List => {
            dash.refresh_products();
            output::products(&dash.products);
            Ok(!matches!(dash.products, ListView::Failed(_)))
        }
        ProductCommands::Add {
            name,
            price,
            category,
            description,
            out_of_stock,
        } => {
            dash.product_form.name = name;
            dash.product_form.price = price;
            dash.product_form.category = category.unwrap_or_default();
            dash.product_form.description = description.unwrap_or_default();
            dash.product_form.in_stock = !out_of_stock;

            let level = dash.submit_product(Instant::now());
            report(dash);
            if level == Level::Success {
                output::products(&dash.products);
            }
            Ok(level == Level::Success)
        }
        ProductCommands::Delete { id, yes } => {
            let confirmed = yes || confirm(RecordKind::Product)?;
            match dash.delete_product(id, |_| confirmed, Instant::now()) {
                Some(level) => {
                    report(dash);
                    Ok(level == Level::Success)
                }
                None => {
                    output::muted("Cancelled");
                    Ok(true)
                }
            }
        }
    }
}

pub fn confirm(kind: RecordKind) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(kind.confirm_prompt())
        .default(false)
        .interact()?)
}

fn report<T>(dash: &Dashboard<T>) {
    if let Some(n) = dash.notifications.latest() {
        output::notification(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crud_core::{HttpRequest, HttpResponse, TransportError};

    const PEN: &str = r#"{"id":"00000000-0000-0000-0000-000000000002","name":"Pen","price":1.5,"category":null,"description":null,"inStock":true,"createdAt":"2026-01-02T03:04:05Z"}"#;

    /// Answers from a fixed queue; an empty queue behaves like a dead backend.
    #[derive(Default)]
    struct Canned {
        replies: VecDeque<(u16, &'static str)>,
        sent: Vec<String>,
    }

    impl Transport for Canned {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.push(format!("{} {}", request.method.as_str(), request.path));
            let (status, body) = self
                .replies
                .pop_front()
                .ok_or_else(|| TransportError("connection refused".to_string()))?;
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            })
        }
    }

    fn dash(replies: &[(u16, &'static str)]) -> Dashboard<Canned> {
        let transport = Canned {
            replies: replies.iter().copied().collect(),
            sent: Vec::new(),
        };
        Dashboard::new(ApiClient::new("http://localhost:5000/api"), transport)
    }

    fn never_asked(_: RecordKind) -> Result<bool> {
        panic!("prompt shown despite --yes");
    }

    fn add_ana() -> UserCommands {
        UserCommands::Add {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            age: None,
            city: None,
        }
    }

    #[test]
    fn rejected_user_add_fails_the_command() {
        let mut dash = dash(&[(400, r#"{"error":"email is required"}"#)]);

        assert!(!users(&mut dash, add_ana(), never_asked).unwrap());
        assert_eq!(dash.transport().sent, vec!["POST http://localhost:5000/api/users"]);
        assert_eq!(dash.notifications.latest().unwrap().message, "email is required");
    }

    #[test]
    fn product_add_succeeds_and_relists() {
        let mut dash = dash(&[(201, PEN), (200, "[]")]);
        let command = ProductCommands::Add {
            name: "Pen".to_string(),
            price: "1.5".to_string(),
            category: None,
            description: None,
            out_of_stock: false,
        };

        assert!(products(&mut dash, command, never_asked).unwrap());
        assert_eq!(
            dash.transport().sent,
            vec![
                "POST http://localhost:5000/api/products",
                "GET http://localhost:5000/api/products",
            ]
        );
    }

    #[test]
    fn unparsable_price_fails_without_request() {
        let mut dash = dash(&[]);
        let command = ProductCommands::Add {
            name: "Pen".to_string(),
            price: "cheap".to_string(),
            category: None,
            description: None,
            out_of_stock: true,
        };

        assert!(!products(&mut dash, command, never_asked).unwrap());
        assert!(dash.transport().sent.is_empty());
    }

    #[test]
    fn delete_of_missing_record_fails_the_command() {
        let mut dash = dash(&[(404, r#"{"error":"User not found"}"#)]);
        let command = UserCommands::Delete { id: Uuid::nil(), yes: true };

        assert!(!users(&mut dash, command, never_asked).unwrap());
        assert_eq!(dash.transport().sent.len(), 1);
    }

    #[test]
    fn declined_delete_is_cancelled_without_request() {
        let mut dash = dash(&[]);
        let mut asked = None;
        let command = ProductCommands::Delete { id: Uuid::nil(), yes: false };

        let ok = products(&mut dash, command, |kind| {
            asked = Some(kind.confirm_prompt());
            Ok(false)
        })
        .unwrap();

        assert!(ok);
        assert_eq!(asked.as_deref(), Some("Are you sure you want to delete this product?"));
        assert!(dash.transport().sent.is_empty());
        assert!(dash.notifications.is_empty());
    }

    #[test]
    fn confirmed_delete_succeeds() {
        let mut dash = dash(&[(204, ""), (200, "[]")]);
        let command = UserCommands::Delete { id: Uuid::nil(), yes: false };

        assert!(users(&mut dash, command, |_| Ok(true)).unwrap());
        assert_eq!(dash.notifications.latest().unwrap().message, "User deleted successfully!");
    }

    #[test]
    fn prompt_error_aborts_before_request() {
        let mut dash = dash(&[]);
        let command = UserCommands::Delete { id: Uuid::nil(), yes: false };

        let result = users(&mut dash, command, |_| Err(anyhow::anyhow!("not a terminal")));
        assert!(result.is_err());
        assert!(dash.transport().sent.is_empty());
    }

    #[test]
    fn failed_list_fails_the_command() {
        let mut dash = dash(&[(503, r#"{"error":"Database unavailable"}"#)]);
        assert!(!users(&mut dash, UserCommands::List, never_asked).unwrap());
    }

    #[test]
    fn status_follows_backend_reachability() {
        let mut up = dash(&[(
            503,
            r#"{"status":"ERROR","database":"disconnected","timestamp":"2026-01-02T03:04:05Z"}"#,
        )]);
        assert!(status(&mut up).unwrap());

        let mut down = dash(&[]);
        assert!(!status(&mut down).unwrap());
        assert!(!overview(&mut down).unwrap());
    }
}
