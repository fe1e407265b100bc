//! Per-connection session handler
//!
//! Drives one connection through room selection, name registration and the
//! steady-state message loop, with a dedicated writer task draining the
//! session's outbox to the socket.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::client::ClientRecord;
use crate::command::{dispatch, Command, EXIT_TOKEN};
use crate::message;
use crate::registry::Registry;
use crate::types::RoomId;

/// Capacity of each client's outbox channel
///
/// A peer that stalls long enough to fill this simply stops receiving
/// broadcasts until it drains; it is never blocked on.
const OUTBOX_CAPACITY: usize = 32;

/// Handle one accepted connection through its whole lifecycle
///
/// Protocol rejections (invalid room, all rooms full) close the connection
/// with no bytes sent; peer disconnects at any point terminate the session
/// without a leave announcement. Neither is an error to the caller.
pub async fn handle_connection(stream: TcpStream, registry: Arc<Registry>) {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let (read_half, write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let (outbox_tx, outbox_rx) = mpsc::channel::<String>(OUTBOX_CAPACITY);
    let write_task = tokio::spawn(write_loop(write_half, outbox_rx));

    // ROOM_SELECT: one message, either "new" or a decimal room id.
    let request = match read_message(&mut reader).await {
        Ok(Some(line)) => line,
        Ok(None) | Err(_) => return,
    };

    let room = if request == "new" {
        match registry.allocate() {
            Ok(room) => room,
            Err(e) => {
                info!("rejecting {}: {}", peer_addr, e);
                return;
            }
        }
    } else {
        let parsed = match request.parse::<RoomId>() {
            Ok(id) => id,
            Err(_) => {
                info!("rejecting {}: invalid room request {:?}", peer_addr, request);
                return;
            }
        };
        match registry.select(parsed) {
            Ok(room) => room,
            Err(e) => {
                info!("rejecting {}: {}", peer_addr, e);
                return;
            }
        }
    };

    if outbox_tx.send(message::room_assigned(room)).await.is_err() {
        return;
    }

    // NAME_REGISTER: the next message is the username, taken as-is.
    let username = match read_message(&mut reader).await {
        Ok(Some(line)) => line,
        Ok(None) | Err(_) => return,
    };

    let client = ClientRecord::new(username, room, outbox_tx.clone());
    registry.join(client.clone());
    info!("{} joined room {} from {}", client.username, room, peer_addr);

    // The joiner does not see its own join announcement.
    registry.broadcast(room, &message::joined(&client), Some(client.id));

    // MESSAGE_LOOP
    loop {
        let line = match read_message(&mut reader).await {
            Ok(Some(line)) => line,
            // EOF or read error: terminate with no leave announcement.
            Ok(None) | Err(_) => {
                debug!("{} disconnected from room {}", client.username, room);
                break;
            }
        };

        if line == EXIT_TOKEN {
            registry.broadcast(room, &message::left(&client), Some(client.id));
            info!("{} left room {}", client.username, room);
            break;
        }

        match Command::parse(&line) {
            Some(cmd) => dispatch(cmd, &client, &registry),
            None => registry.broadcast(
                room,
                &message::chat(client.color, &client.username, &line),
                Some(client.id),
            ),
        }
    }

    // TERMINATED: deregister, then let the writer drain and close.
    registry.release(room, client.id);
    drop(client);
    drop(outbox_tx);
    let _ = write_task.await;
}

/// Read one newline-delimited message
///
/// Strips the trailing `\n` (and a preceding `\r`). Returns `Ok(None)` on
/// end-of-stream.
async fn read_message(reader: &mut BufReader<OwnedReadHalf>) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).await?;
    if n == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Writer task: drain the outbox to the socket
///
/// Ends when every outbox sender is gone (session terminated) or a write
/// fails (peer gone); either way the write half is shut down.
async fn write_loop(mut writer: OwnedWriteHalf, mut outbox: mpsc::Receiver<String>) {
    while let Some(line) = outbox.recv().await {
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            debug!("socket write failed, ending writer: {}", e);
            break;
        }
    }
    let _ = writer.shutdown().await;
}
