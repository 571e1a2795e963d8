use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serve the given `(status line, body)` responses, one per connection, on a
/// local port. Returns the search URL to configure.
pub fn serve(responses: Vec<(&'static str, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}/search")
}

/// A search URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/search")
}

/// A search results page listing `prices` (already formatted like `Rp8.500.000`).
pub fn search_page(prices: &[&str]) -> String {
    let cards: String = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            format!(
                r#"<div class="prd_container"><span class="prd_name">Listing {i}</span><div class="prd_price">{price}</div></div>"#
            )
        })
        .collect();
    format!("<!doctype html><html><body><div id=\"results\">{cards}</div></body></html>")
}
