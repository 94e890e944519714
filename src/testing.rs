//! Local HTTP server for exercising the real clients.

use std::{
    io::{self, BufRead, BufReader, Read, Write},
    net::{TcpListener, TcpStream},
    thread::{self, JoinHandle},
};

/// Answers one connection per canned response, then stops listening.
pub struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<io::Result<Vec<String>>>,
}

impl CannedServer {
    /// Each response is a status line without the protocol, and a body.
    pub fn spawn(responses: Vec<(&'static str, &'static str)>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let handle = thread::spawn(move || {
            responses
                .into_iter()
                .map(|(status, body)| {
                    let (mut stream, _) = listener.accept()?;
                    let request = read_request(&stream)?;
                    write!(stream, "HTTP/1.1 {status}\r\n")?;
                    write!(stream, "Content-Length: {}\r\nConnection: close\r\n\r\n", body.len())?;
                    stream.write_all(body.as_bytes())?;
                    stream.flush()?;
                    Ok(request)
                })
                .collect()
        });
        Ok(Self { base_url, handle })
    }

    /// Wait for all the responses to be sent and return the raw requests.
    pub fn requests(self) -> io::Result<Vec<String>> {
        self.handle.join().map_err(|_| io::Error::other("the server thread panicked"))?
    }
}

fn read_request(stream: &TcpStream) -> io::Result<String> {
    let mut reader = BufReader::new(stream);
    let mut request = String::new();
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().map_err(io::Error::other)?;
        }
        request.push_str(&line);
        if line == "\r\n" || line.is_empty() {
            break;
        }
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;
    request.push_str(&String::from_utf8_lossy(&body));
    Ok(request)
}
