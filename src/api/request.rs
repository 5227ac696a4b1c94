use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::models::{CreateRequest, LdapSetupRequest};
use crate::commands::auth::{LDAP, LDAP_SETUP_ARGS};
use crate::commands::{Action, Command};
use crate::validation::{parse_options, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid command {0}")]
    UnsupportedAction(Action),

    #[error("Unsupported auth type: {0}")]
    UnsupportedAuthType(String),

    #[error("Missing argument {index} for {command}")]
    MissingArgument { command: &'static str, index: usize },

    #[error("Invalid options: {0}")]
    Options(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// HTTP verb for an action. Actions outside this table have no request form.
pub fn method_for(action: Action) -> Result<Method, RequestError> {
    match action {
        Action::Create | Action::Setup => Ok(Method::PUT),
        Action::Delete => Ok(Method::DELETE),
        Action::List => Ok(Method::GET),
        other => Err(RequestError::UnsupportedAction(other)),
    }
}

/// Everything needed to put one command on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    command: &'static str,
    method: Method,
    url_base: String,
    url_path: String,
    content: Vec<u8>,
    headers: HeaderMap,
}

impl HttpRequest {
    /// Non-PUT requests carry their first argument in the URL; PUT requests
    /// carry a JSON body.
    pub fn compose(command: &Command) -> Result<Self, RequestError> {
        let method = method_for(command.action())?;
        let args = command.args();

        let mut request = Self {
            command: command.name(),
            method,
            url_base: format!("/{}", command.name()),
            url_path: String::new(),
            content: Vec::new(),
            headers: HeaderMap::new(),
        };

        if request.method != Method::PUT {
            if let Some(first) = args.first() {
                request.url_path = first.clone();
            }
        } else {
            request.content = match command {
                Command::Auth(_) => serde_json::to_vec(&ldap_body(args)?)?,
                _ => serde_json::to_vec(&create_body(command.name(), args)?)?,
            };
        }

        if request.content.is_empty() {
            request
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        } else {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            request
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from(request.content.len()));
        }

        log::debug!(
            "Composed {} {} ({} byte body)",
            request.method,
            request.path(),
            request.content.len()
        );
        Ok(request)
    }

    pub fn command(&self) -> &'static str {
        self.command
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url_base(&self) -> &str {
        &self.url_base
    }

    pub fn url_path(&self) -> &str {
        &self.url_path
    }

    /// `<base>/<path>`; the trailing slash is kept when the path is empty.
    pub fn path(&self) -> String {
        format!("{}/{}", self.url_base, self.url_path)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn create_body(command: &'static str, args: &[String]) -> Result<CreateRequest, RequestError> {
    let name = args
        .first()
        .ok_or(RequestError::MissingArgument { command, index: 0 })?
        .clone();

    let options = match args.get(1) {
        Some(raw) => {
            let parsed = parse_options(raw)?;
            let map: Map<String, Value> = parsed
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            Some(map)
        }
        None => None,
    };

    Ok(CreateRequest { name, options })
}

fn ldap_body(args: &[String]) -> Result<LdapSetupRequest, RequestError> {
    let kind = args.first().ok_or(RequestError::MissingArgument {
        command: "auth",
        index: 0,
    })?;
    if kind != LDAP {
        return Err(RequestError::UnsupportedAuthType(kind.clone()));
    }
    if args.len() < LDAP_SETUP_ARGS {
        return Err(RequestError::MissingArgument {
            command: "auth",
            index: args.len(),
        });
    }

    Ok(LdapSetupRequest {
        kind: kind.clone(),
        server: args[1].clone(),
        base_dn: args[2].clone(),
        admin_account: args[3].clone(),
        admin_account_pw: args[4].clone(),
    })
}
