use std::path::PathBuf;

pub const APP_NAME: &str = "buildlayout";

/// Name of the project-local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILENAME: &str = "buildlayout.toml";

/// Name of the config file inside the user config directory.
pub const USER_CONFIG_FILENAME: &str = "config.toml";

/// Returns the directory for configuration files for the application
///
/// Returns `None` if the user's environment does not define one.
#[cfg(windows)]
pub fn config_dir() -> Option<PathBuf> {
  std::env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// Returns the directory for configuration files for the application
///
/// Returns `None` if neither `XDG_CONFIG_HOME` nor `HOME` is set.
#[cfg(not(windows))]
pub fn config_dir() -> Option<PathBuf> {
  let config_home = std::env::var_os("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
  Some(config_home.join(APP_NAME))
}

/// Path of the per-user config file, if a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
  config_dir().map(|dir| dir.join(USER_CONFIG_FILENAME))
}

#[cfg(test)]
#[cfg(not(windows))]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn xdg_config_home_takes_precedence() {
    temp_env::with_vars(
      [
        ("XDG_CONFIG_HOME", Some("/custom/config")),
        ("HOME", Some("/home/user")),
      ],
      || {
        assert_eq!(config_dir(), Some(PathBuf::from("/custom/config").join(APP_NAME)));
      },
    );
  }

  #[test]
  #[serial]
  fn falls_back_to_home_config() {
    temp_env::with_vars(
      [("XDG_CONFIG_HOME", None::<&str>), ("HOME", Some("/home/user"))],
      || {
        assert_eq!(
          user_config_path(),
          Some(PathBuf::from("/home/user/.config/buildlayout/config.toml"))
        );
      },
    );
  }

  #[test]
  #[serial]
  fn no_home_means_no_config_dir() {
    temp_env::with_vars([("XDG_CONFIG_HOME", None::<&str>), ("HOME", None::<&str>)], || {
      assert_eq!(config_dir(), None);
    });
  }
}
