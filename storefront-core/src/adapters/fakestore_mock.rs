//! Mock catalog server for testing
//!
//! A tiny HTTP server on a raw `TcpListener` that answers the same routes as
//! the Fake Store API:
//! - GET /products returns `[ {...}, ... ]`
//! - GET /products/{id} returns `{...}` or 404 when the id is unknown
//!
//! It counts requests so tests can check what the response cache saved.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use serde::Serialize;

/// Mock catalog server
pub struct MockCatalogServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of products in the catalog (ids 1..=n)
    pub num_products: usize,
    /// Answer every request with this status code
    pub fail_status: Option<u16>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            num_products: 5,
            fail_status: None,
            delay_ms: 0,
        }
    }
}

#[derive(Serialize)]
struct MockProduct {
    id: u64,
    title: String,
    price: f64,
    description: String,
    category: String,
    image: String,
    rating: MockRating,
}

#[derive(Serialize)]
struct MockRating {
    rate: f64,
    count: u32,
}

impl MockCatalogServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(AtomicUsize::new(0));
        let running_clone = running.clone();
        let requests_clone = requests.clone();

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        // Accepted sockets inherit non-blocking mode on some platforms
                        let _ = stream.set_nonblocking(false);
                        requests_clone.fetch_add(1, Ordering::SeqCst);
                        let cfg = config.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Number of connections served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockCatalogServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig) {
    let mut buffer = [0; 4096];

    if let Ok(n) = stream.read(&mut buffer) {
        let request = String::from_utf8_lossy(&buffer[..n]);

        if config.delay_ms > 0 {
            thread::sleep(std::time::Duration::from_millis(config.delay_ms));
        }

        let first_line = request.lines().next().unwrap_or("");
        let parts: Vec<&str> = first_line.split_whitespace().collect();

        if parts.len() < 2 {
            send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
            return;
        }

        if let Some(status) = config.fail_status {
            send_response(&mut stream, status, "Error", r#"{"error": "Simulated failure"}"#);
            return;
        }

        let method = parts[0];
        let path = parts[1].split('?').next().unwrap_or(parts[1]);

        if method != "GET" {
            send_response(
                &mut stream,
                405,
                "Method Not Allowed",
                r#"{"error": "Method not allowed"}"#,
            );
            return;
        }

        if path == "/products" {
            let products = generate_mock_products(config.num_products);
            let json = serde_json::to_string(&products).unwrap();
            send_response(&mut stream, 200, "OK", &json);
        } else if let Some(id) = path.strip_prefix("/products/") {
            match id.parse::<usize>() {
                Ok(id) if id >= 1 && id <= config.num_products => {
                    let json = serde_json::to_string(&mock_product(id as u64)).unwrap();
                    send_response(&mut stream, 200, "OK", &json);
                }
                _ => send_response(
                    &mut stream,
                    404,
                    "Not Found",
                    r#"{"error": "Product not found"}"#,
                ),
            }
        } else {
            send_response(
                &mut stream,
                404,
                "Not Found",
                r#"{"error": "Endpoint not found"}"#,
            );
        }
    }
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn generate_mock_products(count: usize) -> Vec<MockProduct> {
    (1..=count as u64).map(mock_product).collect()
}

fn mock_product(id: u64) -> MockProduct {
    let catalog = [
        ("Foldsack No. 1 Backpack", 109.95, "men's clothing"),
        ("Mens Casual Premium Slim Fit T-Shirts", 22.3, "men's clothing"),
        ("Mens Cotton Jacket", 55.99, "men's clothing"),
        ("Solid Gold Petite Micropave", 168.0, "jewelery"),
        ("WD 2TB Elements Portable External Hard Drive", 64.0, "electronics"),
    ];
    let (title, price, category) = catalog[(id as usize - 1) % catalog.len()];

    MockProduct {
        id,
        title: title.to_string(),
        price,
        description: format!("Description of {}", title),
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/{}.jpg", id),
        rating: MockRating {
            rate: 3.5 + (id % 3) as f64 * 0.5,
            count: 100 + id as u32,
        },
    }
}
