#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use worktrack::libs::config::MessagesConfig;
    use worktrack::libs::motivation::{
        fallback_message, MessageGenerator, MessageKind, MOTIVATIONAL, REGISTRATION_REMINDERS,
    };

    /// Answers one request with `body` and hands back the raw request text.
    async fn serve_once(body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/messages", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || String::from_utf8_lossy(&request).contains("\"kind\"") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (url, handle)
    }

    #[test]
    fn test_kind_follows_progress() {
        assert_eq!(MessageKind::for_progress(0.5, true), MessageKind::Motivational);
        assert_eq!(MessageKind::for_progress(1.0, true), MessageKind::RegistrationReminder);
        assert_eq!(MessageKind::for_progress(1.2, false), MessageKind::Motivational);
    }

    #[test]
    fn test_fallback_pools() {
        assert_eq!(MOTIVATIONAL.len(), 20);
        assert_eq!(REGISTRATION_REMINDERS.len(), 10);
        for _ in 0..20 {
            assert!(MOTIVATIONAL.contains(&fallback_message(MessageKind::Motivational)));
            assert!(REGISTRATION_REMINDERS.contains(&fallback_message(MessageKind::RegistrationReminder)));
        }
    }

    #[tokio::test]
    async fn test_offline_uses_pool() {
        let text = MessageGenerator::offline().generate(MessageKind::Motivational).await;
        assert!(MOTIVATIONAL.contains(&text.as_str()));
    }

    #[tokio::test]
    async fn test_remote_text_is_used() {
        let (url, server) = serve_once(r#"{"text":"  Keep going!  "}"#).await;
        let generator = MessageGenerator::new(Some(MessagesConfig {
            api_url: url,
            auth_token: "secret".to_string(),
        }));

        let text = generator.generate(MessageKind::RegistrationReminder).await;
        assert_eq!(text, "Keep going!");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /messages"));
        assert!(request.to_lowercase().contains("authorization: bearer secret"));
        assert!(request.contains(r#"{"kind":"registrationReminder"}"#));
    }

    #[tokio::test]
    async fn test_empty_remote_text_falls_back() {
        let (url, _server) = serve_once(r#"{"text":"   "}"#).await;
        let generator = MessageGenerator::new(Some(MessagesConfig {
            api_url: url,
            auth_token: String::new(),
        }));
        let text = generator.generate(MessageKind::Motivational).await;
        assert!(MOTIVATIONAL.contains(&text.as_str()));
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/messages", listener.local_addr().unwrap());
        drop(listener);

        let generator = MessageGenerator::new(Some(MessagesConfig {
            api_url: url,
            auth_token: String::new(),
        }));
        let text = generator.generate(MessageKind::RegistrationReminder).await;
        assert!(REGISTRATION_REMINDERS.contains(&text.as_str()));
    }

    #[tokio::test]
    async fn test_blank_url_means_offline() {
        let generator = MessageGenerator::new(Some(MessagesConfig {
            api_url: "  ".to_string(),
            auth_token: String::new(),
        }));
        let text = generator.generate(MessageKind::Motivational).await;
        assert!(MOTIVATIONAL.contains(&text.as_str()));
    }
}
