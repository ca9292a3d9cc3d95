//! fakexy random / fakexy address - generate and show an address.

use fakexy::{
    copy_field, AddressRequest, ApiClient, Clipboard, ClipboardError, FieldSelector, Notice,
    PreferredOrder, RenderTarget, Rendered, Session,
};

use crate::cli::OutputArgs;
use crate::clipboard::SystemClipboard;
use crate::error::CliError;
use crate::terminal::{OutputFormat, TerminalTarget};

impl OutputArgs {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.plain {
            OutputFormat::Plain
        } else {
            OutputFormat::Table
        }
    }
}

/// Run the random or address command against the terminal and system clipboard.
pub async fn run_fetch(
    client: &ApiClient,
    preferred: PreferredOrder,
    request: AddressRequest,
    output: &OutputArgs,
) -> Result<(), CliError> {
    let mut target = TerminalTarget::stdio(output.format());
    let result = fetch_with(
        client,
        preferred,
        &request,
        output,
        &mut target,
        SystemClipboard::new,
    )
    .await;
    if let Some(e) = target.take_error() {
        return Err(e.into());
    }
    result?;
    Ok(())
}

/// Fetch, render and optionally copy.
///
/// The clipboard is only opened when a copy was requested.
pub async fn fetch_with<T, C, F>(
    client: &ApiClient,
    preferred: PreferredOrder,
    request: &AddressRequest,
    output: &OutputArgs,
    target: &mut T,
    open_clipboard: F,
) -> Result<Rendered, CliError>
where
    T: RenderTarget,
    C: Clipboard,
    F: FnOnce() -> Result<C, ClipboardError>,
{
    let mut session = Session::new(preferred);
    let rendered = session
        .load(client, request, target)
        .await
        .map_err(|_| CliError::Reported)?;

    if output.copy_all {
        let mut clipboard = open_clipboard()?;
        session.copy_all(&mut clipboard, target)?;
    } else if let Some(field) = &output.copy {
        match rendered.list() {
            Some(list) => {
                let mut clipboard = open_clipboard()?;
                copy_field(&mut clipboard, target, list, &FieldSelector::from(field.as_str()))?;
            }
            None => target.notify(Notice::warning("No data to copy!")),
        }
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Clipboard whose contents outlive the command under test.
    #[derive(Default, Clone)]
    struct MemoryClipboard {
        text: Rc<RefCell<Option<String>>>,
    }

    impl MemoryClipboard {
        fn contents(&self) -> Option<String> {
            self.text.borrow().clone()
        }
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            *self.text.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn no_clipboard() -> Result<MemoryClipboard, ClipboardError> {
        Err(ClipboardError::Unavailable("not in tests".to_string()))
    }

    async fn server_with_address() -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/address"))
            .and(query_param("code", "FR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Country": "France",
                "Street": "1 Rue de Rivoli",
                "Extra": "x"
            })))
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn target() -> TerminalTarget<Vec<u8>, Vec<u8>> {
        TerminalTarget::new(Vec::new(), Vec::new(), OutputFormat::Plain)
    }

    fn output(target: TerminalTarget<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, diag) = target.into_inner();
        (String::from_utf8(out).unwrap(), String::from_utf8(diag).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_prints_ordered_fields() {
        let mock_server = server_with_address().await;
        let client = ApiClient::with_base_url(mock_server.uri()).unwrap();
        let mut target = target();

        let rendered = fetch_with(
            &client,
            PreferredOrder::default(),
            &AddressRequest::Country("FR".into()),
            &OutputArgs::default(),
            &mut target,
            no_clipboard,
        )
        .await
        .unwrap();

        assert_eq!(rendered.list().unwrap().len(), 3);
        let (out, _) = output(target);
        assert_eq!(out, "Street: 1 Rue de Rivoli\nCountry: France\nExtra: x\n");
    }

    #[tokio::test]
    async fn test_copy_all_uses_display_order() {
        let mock_server = server_with_address().await;
        let client = ApiClient::with_base_url(mock_server.uri()).unwrap();
        let mut target = target();
        let clipboard = MemoryClipboard::default();

        let args = OutputArgs {
            copy_all: true,
            ..OutputArgs::default()
        };
        fetch_with(
            &client,
            PreferredOrder::default(),
            &AddressRequest::Country("FR".into()),
            &args,
            &mut target,
            || Ok(clipboard.clone()),
        )
        .await
        .unwrap();

        assert_eq!(
            clipboard.contents().as_deref(),
            Some("Street: 1 Rue de Rivoli\nCountry: France\nExtra: x\n")
        );
        let (_, diag) = output(target);
        assert_eq!(diag, "✓ All fields copied!\n");
    }

    #[tokio::test]
    async fn test_copy_single_field_by_id() {
        let mock_server = server_with_address().await;
        let client = ApiClient::with_base_url(mock_server.uri()).unwrap();
        let mut target = target();
        let clipboard = MemoryClipboard::default();

        let args = OutputArgs {
            copy: Some("field-1".to_string()),
            ..OutputArgs::default()
        };
        fetch_with(
            &client,
            PreferredOrder::default(),
            &AddressRequest::Country("FR".into()),
            &args,
            &mut target,
            || Ok(clipboard.clone()),
        )
        .await
        .unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("France"));
    }

    #[tokio::test]
    async fn test_copy_unknown_field_fails() {
        let mock_server = server_with_address().await;
        let client = ApiClient::with_base_url(mock_server.uri()).unwrap();
        let mut target = target();
        let clipboard = MemoryClipboard::default();

        let args = OutputArgs {
            copy: Some("CVV".to_string()),
            ..OutputArgs::default()
        };
        let err = fetch_with(
            &client,
            PreferredOrder::default(),
            &AddressRequest::Country("FR".into()),
            &args,
            &mut target,
            || Ok(clipboard.clone()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Clipboard(ClipboardError::NoSuchField(_))));
    }

    #[tokio::test]
    async fn test_api_failure_is_reported_inline() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/random"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Generator down"})),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_base_url(mock_server.uri()).unwrap();
        let mut target = target();

        let err = fetch_with(
            &client,
            PreferredOrder::default(),
            &AddressRequest::Random,
            &OutputArgs::default(),
            &mut target,
            no_clipboard,
        )
        .await
        .unwrap_err();

        assert!(!err.needs_report());
        let (out, diag) = output(target);
        assert!(out.is_empty());
        assert_eq!(diag, "Error: Generator down\n");
    }

    #[tokio::test]
    async fn test_copy_with_no_data_warns() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_base_url(mock_server.uri()).unwrap();
        let mut target = target();

        let args = OutputArgs {
            copy: Some("Street".to_string()),
            ..OutputArgs::default()
        };
        let rendered = fetch_with(
            &client,
            PreferredOrder::default(),
            &AddressRequest::Random,
            &args,
            &mut target,
            no_clipboard,
        )
        .await
        .unwrap();

        assert_eq!(rendered, Rendered::NoData);
        let (out, diag) = output(target);
        assert_eq!(out, "No address data found.\n");
        assert_eq!(diag, "! No data to copy!\n");
    }

    #[test]
    fn test_output_format_selection() {
        assert_eq!(OutputArgs::default().format(), OutputFormat::Table);
        let json = OutputArgs {
            json: true,
            ..OutputArgs::default()
        };
        assert_eq!(json.format(), OutputFormat::Json);
        let plain = OutputArgs {
            plain: true,
            ..OutputArgs::default()
        };
        assert_eq!(plain.format(), OutputFormat::Plain);
    }
}
