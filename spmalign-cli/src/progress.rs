use std::io::{self, Read, Seek, SeekFrom};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar that implements the `Read` trait.
///
/// This wrapper of `indicatif`'s `ProgressBar` updates progress based on the
/// current offset within the file.
pub struct ReadProgress<R> {
    inner: R,
    progress_bar: ProgressBar,
}

impl<R> ReadProgress<R>
where
    R: Seek,
{
    pub fn new(mut read: R) -> io::Result<Self> {
        let len = read.seek(SeekFrom::End(0))? + 1;
        read.seek(SeekFrom::Start(0))?;
        let style = ProgressStyle::with_template("{bar} {bytes}/{total_bytes}")
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let progress_bar = ProgressBar::new(len);
        progress_bar.set_style(style);

        Ok(ReadProgress {
            inner: read,
            progress_bar,
        })
    }
}

impl<R> Read for ReadProgress<R>
where
    R: Read + Seek,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n_read = self.inner.read(buf)?;
        let pos = self.inner.stream_position()?;
        self.progress_bar.set_position(pos);
        Ok(n_read)
    }
}

impl<R> Drop for ReadProgress<R> {
    fn drop(&mut self) {
        self.progress_bar.finish();
    }
}

/// Measure the number of messages tokenized per second.
///
/// When an instance of `TokenizerSpeed` is constructed, it takes the
/// current time. `count_message` should be called for each message
/// that was processed. The processing speed is logged when the
/// instance is dropped.
pub struct TokenizerSpeed {
    start: Instant,
    n_messages: usize,
    n_tokens: usize,
}

impl TokenizerSpeed {
    /// Construct a new instance.
    pub fn new() -> Self {
        TokenizerSpeed {
            start: Instant::now(),
            n_messages: 0,
            n_tokens: 0,
        }
    }

    /// Count a processed message and its tokens.
    pub fn count_message(&mut self, n_tokens: usize) {
        self.n_messages += 1;
        self.n_tokens += n_tokens;
    }
}

impl Default for TokenizerSpeed {
    fn default() -> Self {
        TokenizerSpeed::new()
    }
}

impl Drop for TokenizerSpeed {
    fn drop(&mut self) {
        let elapsed_secs = self.start.elapsed().as_secs_f32();
        log::info!(
            "Tokenized {} messages ({} tokens) in {:.1}s ({:.1} messages/s)",
            self.n_messages,
            self.n_tokens,
            elapsed_secs,
            self.n_messages as f32 / elapsed_secs
        );
    }
}
