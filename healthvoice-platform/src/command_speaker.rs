use anyhow::{Context, anyhow};
use healthvoice_engine::traits::Speaker;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

/// Speaks by running an external TTS program (`espeak`, `say`, ...) with the
/// text as its last argument.
///
/// At most one utterance runs at a time. The child is killed on `cancel`,
/// on the next `speak`, and when the speaker is dropped.
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    pub fn new(command: &[String]) -> anyhow::Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| anyhow!("speech command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            current: Mutex::new(None),
        })
    }

    async fn stop(current: &mut Option<Child>) -> anyhow::Result<()> {
        let Some(mut child) = current.take() else {
            return Ok(());
        };
        if child.try_wait().context("poll speech process")?.is_none() {
            child.start_kill().context("kill speech process")?;
            let _ = child.wait().await;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        let mut current = self.current.lock().await;
        Self::stop(&mut current).await?;

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawn speech command: {}", self.program))?;

        log::debug!("speaking {} chars via {}", text.chars().count(), self.program);
        *current = Some(child);
        Ok(())
    }

    async fn cancel(&self) -> anyhow::Result<()> {
        let mut current = self.current.lock().await;
        Self::stop(&mut current).await
    }

    async fn is_speaking(&self) -> bool {
        let mut current = self.current.lock().await;
        match current.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(_) => {
                *current = None;
                false
            }
            None => false,
        }
    }
}
