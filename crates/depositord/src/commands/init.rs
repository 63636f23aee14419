//! Configuration bootstrap command.

use dialoguer::Confirm;

use super::*;

/// Writes the configuration template for the operator to fill in.
///
/// Asks before overwriting an existing file unless `--force` was given.
pub async fn init(cli: &Cli, force: bool) -> Result<()> {
  let path = cli.config_path();

  if path.exists() && !force {
    if cli.accept_defaults {
      println!(
        "{} Configuration already exists at {}, leaving it alone",
        style(INFO_PREFIX).blue(),
        path.display()
      );
      return Ok(());
    }
    let overwrite = Confirm::new()
      .with_prompt(format!("{} already exists, overwrite it?", path.display()))
      .default(false)
      .interact()?;
    if !overwrite {
      return Ok(());
    }
  }

  Config::write_default(&path)?;
  println!(
    "{} Wrote configuration template to {}",
    style(SUCCESS_PREFIX).green(),
    path.display()
  );
  println!(
    "{} Fill in the provider API key, repository collection, and institution affiliation ids \
     before running",
    style(INFO_PREFIX).blue()
  );
  Ok(())
}
