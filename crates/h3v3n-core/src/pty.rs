//! PTY (Pseudo-Terminal) management
//!
//! Handles spawning shell processes and I/O between the shell and terminal.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, anyhow};
use portable_pty::{Child, CommandBuilder, PtySize, native_pty_system};

use crate::ExitStatus;

/// Messages sent to the PTY writer thread
pub enum PtyInput {
    /// Data to write to the PTY
    Data(Vec<u8>),
    /// Resize the PTY
    Resize { cols: u16, rows: u16 },
    /// Shutdown the PTY
    Shutdown,
}

/// PTY handle for communicating with a shell process
pub struct Pty {
    /// Channel to send input to the PTY
    input_tx: Sender<PtyInput>,
    /// Channel to receive output from the PTY
    output_rx: Receiver<Vec<u8>>,
    /// Child process handle
    child: Box<dyn Child + Send + Sync>,
}

impl Pty {
    /// Spawn `argv` in a new PTY with `cwd` as working directory
    pub fn spawn(cwd: &Path, argv: &[String], cols: u16, rows: u16) -> anyhow::Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow!("empty command line"))?;

        let pty_system = native_pty_system();

        let size = PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };

        let pair = pty_system.openpty(size).context("openpty failed")?;

        let mut cmd = CommandBuilder::new(program);
        cmd.args(args);
        cmd.cwd(cwd);
        cmd.env("TERM", "xterm-256color");

        let child = pair
            .slave
            .spawn_command(cmd)
            .with_context(|| format!("could not start {}", program))?;
        // Only the child should hold the slave side, so EOF arrives on exit
        drop(pair.slave);

        // Set up channels for communication
        let (input_tx, input_rx) = mpsc::channel::<PtyInput>();
        let (output_tx, output_rx) = mpsc::channel::<Vec<u8>>();

        let mut reader = pair.master.try_clone_reader()?;
        let mut writer = pair.master.take_writer()?;
        let master = pair.master;

        // Reader thread - reads PTY output and sends to channel
        thread::spawn(move || {
            let mut buf = [0u8; 4096];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break, // EOF
                    Ok(n) => {
                        if output_tx.send(buf[..n].to_vec()).is_err() {
                            break; // Channel closed
                        }
                    }
                    Err(e) => {
                        log::debug!("PTY read ended: {}", e);
                        break;
                    }
                }
            }
            log::debug!("PTY reader thread exiting");
        });

        // Writer thread - receives from channel and writes to PTY
        thread::spawn(move || {
            for msg in input_rx {
                match msg {
                    PtyInput::Data(data) => {
                        if let Err(e) = writer.write_all(&data) {
                            log::error!("PTY write error: {}", e);
                            break;
                        }
                        let _ = writer.flush();
                    }
                    PtyInput::Resize { cols, rows } => {
                        let size = PtySize {
                            rows,
                            cols,
                            pixel_width: 0,
                            pixel_height: 0,
                        };
                        if let Err(e) = master.resize(size) {
                            log::error!("PTY resize error: {}", e);
                        }
                    }
                    PtyInput::Shutdown => {
                        log::debug!("PTY writer thread shutting down");
                        break;
                    }
                }
            }
            log::debug!("PTY writer thread exiting");
        });

        Ok(Self {
            input_tx,
            output_rx,
            child,
        })
    }

    /// Write data to the PTY (keyboard input)
    pub fn write(&self, data: &[u8]) {
        let _ = self.input_tx.send(PtyInput::Data(data.to_vec()));
    }

    /// Read all available output from the PTY (non-blocking)
    pub fn read_available(&self) -> Vec<u8> {
        let mut output = Vec::new();
        while let Ok(data) = self.output_rx.try_recv() {
            output.extend(data);
        }
        output
    }

    /// Non-blocking check for shell exit
    pub fn try_wait(&mut self) -> Option<ExitStatus> {
        match self.child.try_wait() {
            Ok(Some(status)) => Some(ExitStatus {
                code: status.exit_code(),
            }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to poll shell process: {}", e);
                None
            }
        }
    }

    /// Resize the PTY
    pub fn resize(&self, cols: u16, rows: u16) {
        let _ = self.input_tx.send(PtyInput::Resize { cols, rows });
    }

    /// Shutdown the PTY
    pub fn shutdown(&self) {
        let _ = self.input_tx.send(PtyInput::Shutdown);
    }
}

impl Drop for Pty {
    fn drop(&mut self) {
        self.shutdown();
        if let Ok(None) = self.child.try_wait() {
            if let Err(e) = self.child.kill() {
                log::debug!("Failed to terminate shell: {}", e);
            }
        }
    }
}
