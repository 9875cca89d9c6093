#[cfg(test)] mod test_memory_store;

#[cfg(test)] use std::env;
#[cfg(test)] use std::fs;
#[cfg(test)] use std::io::{Read, Write};
#[cfg(test)] use std::net::{SocketAddr, TcpListener};
#[cfg(test)] use std::sync::Arc;
#[cfg(test)] use std::sync::atomic::AtomicUsize;
#[cfg(test)] use std::sync::atomic::Ordering;
#[cfg(test)] use std::thread;

#[cfg(test)] use super::contact::{Contact, ContactBuilder};

#[cfg(test)]
fn working_path(input: &str) -> String {
    let path = env::current_dir().unwrap().join(input);
    if !fs::metadata(&path).is_ok() {
        match fs::create_dir(&path) {
            Ok(_) => {}
            Err(e) => {
                panic!("Failed to create directory: {}", e);
            }
        }
    }
    path.display().to_string()
}

#[cfg(test)]
fn remove_working_path(input: &str) {
    if fs::metadata(&input).is_ok() {
        match fs::remove_dir_all(&input) {
            Ok(_) => {}
            Err(e) => {
                panic!("Failed to remove directory: {}", e);
            }
        }
    }
}

#[cfg(test)]
fn contact(id: &str, name: &str, email: &str) -> Contact {
    ContactBuilder::new(id)
        .with_name(name)
        .with_email_address(email)
        .build()
}

// Serves a canned HTTP response for every incoming request, counting
// the requests it answered.
#[cfg(test)]
fn serve_avatars(status: &'static str, body: Vec<u8>) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    thread::spawn(move || {
        loop {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };

            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            loop {
                let Ok(num) = stream.read(&mut buf) else {
                    break;
                };
                if num == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..num]);
                if request.windows(4).any(|v| v == b"\r\n\r\n") {
                    break;
                }
            }

            counter.fetch_add(1, Ordering::SeqCst);

            let header = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            _ = stream.write_all(header.as_bytes());
            _ = stream.write_all(&body);
        }
    });

    (addr, hits)
}
