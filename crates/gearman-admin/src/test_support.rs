//! In-process fake broker for exercising sessions over real sockets.
//!
//! The broker accepts one TCP connection, and for every request line it
//! receives writes the next canned reply verbatim. Once the replies run out
//! it closes the connection, so a reply lacking its terminator simulates a
//! broker that disconnects mid-response.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use gearman_admin_config::ServerEndpoint;

const ACCEPT_DEADLINE: Duration = Duration::from_secs(2);

/// A fake broker serving canned replies to a single client.
#[derive(Debug)]
pub struct FakeBroker {
    port: u16,
    handle: Option<thread::JoinHandle<io::Result<Vec<String>>>>,
}

impl FakeBroker {
    /// Spawns the broker on an ephemeral loopback port.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot be bound.
    pub fn spawn<I, R>(replies: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let replies: Vec<String> = replies.into_iter().map(Into::into).collect();
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        listener.set_nonblocking(true)?;
        let port = listener.local_addr()?.port();
        let handle = thread::spawn(move || serve_client(&listener, &replies));
        Ok(Self {
            port,
            handle: Some(handle),
        })
    }

    /// Endpoint clients should dial.
    #[must_use]
    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint::tcp("127.0.0.1", self.port)
    }

    /// Waits for the broker to finish and returns the request lines it read.
    ///
    /// # Errors
    ///
    /// Returns the broker's IO failure, or an error if its thread panicked.
    pub fn finish(mut self) -> io::Result<Vec<String>> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| io::Error::other("fake broker thread panicked"))?,
            None => Ok(Vec::new()),
        }
    }
}

impl Drop for FakeBroker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve_client(listener: &TcpListener, replies: &[String]) -> io::Result<Vec<String>> {
    let deadline = Instant::now() + ACCEPT_DEADLINE;
    loop {
        match listener.accept() {
            Ok((stream, _)) => return respond(stream, replies),
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    // No client arrived; exit so the test does not hang.
                    return Ok(Vec::new());
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(error) => return Err(error),
        }
    }
}

fn respond(stream: TcpStream, replies: &[String]) -> io::Result<Vec<String>> {
    stream.set_nonblocking(false)?;
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    let mut requests = Vec::new();
    for reply in replies {
        let mut request = String::new();
        if reader.read_line(&mut request)? == 0 {
            break;
        }
        requests.push(request);
        writer.write_all(reply.as_bytes())?;
        writer.flush()?;
    }
    Ok(requests)
}
