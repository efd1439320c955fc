use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

/// A serialized response plus how much of it has reached the peer.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_partial(stream, &self.buffer, &mut self.written).await
    }
}

/// Writes all of `chunk`, looping on short writes.
pub async fn write_chunk<W>(stream: &mut W, chunk: &[u8]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    write_partial(stream, chunk, &mut written).await
}

async fn write_partial<W>(stream: &mut W, buf: &[u8], written: &mut usize) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while *written < buf.len() {
        let n = stream.write(&buf[*written..]).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("connection closed while writing"));
        }

        *written += n;
    }

    Ok(())
}
