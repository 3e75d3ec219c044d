use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Args;
use colored::Colorize;
use lakes_lib::{Fetcher, LakeDraft, PictureChoice, Repository, search::filter_names};

use crate::{CliError, CliResult};

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    pub name: String,
    /// JPEG or PNG image; the placeholder is stored when omitted
    #[arg(long)]
    pub picture: Option<PathBuf>,
    #[arg(short, long, conflicts_with = "fetch")]
    pub description: Option<String>,
    /// Take the description from the online encyclopedia
    #[arg(long)]
    pub fetch: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Current name of the lake
    pub old_name: String,
    /// New name, if the lake is renamed
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(long, conflicts_with = "reset_picture")]
    pub picture: Option<PathBuf>,
    /// Replace the stored picture with the placeholder
    #[arg(long)]
    pub reset_picture: bool,
    /// New description; the current one is kept when omitted
    #[arg(short, long, conflicts_with = "fetch")]
    pub description: Option<String>,
    /// Take the description from the online encyclopedia
    #[arg(long)]
    pub fetch: bool,
}

pub fn list(repo: &Repository, search: Option<&str>) -> CliResult<()> {
    let names = repo.list_names()?;

    for name in filter_names(&names, search.unwrap_or_default()) {
        println!("{name}");
    }

    Ok(())
}

pub fn show(repo: &Repository, name: &str, picture_out: Option<&Path>) -> CliResult<()> {
    let lake = repo.get(name)?;

    println!("{}", lake.name().bold());
    println!("{}", lake.description());

    if let Some(path) = picture_out {
        fs::write(path, lake.picture()).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        println!(
            "{} {} bytes to {}",
            "Wrote".green(),
            lake.picture().len(),
            path.display()
        );
    }

    Ok(())
}

pub async fn add(repo: &Repository, fetcher: &Fetcher, args: &AddArgs) -> CliResult<()> {
    let mut draft = LakeDraft::new(&args.name);
    if let Some(path) = &args.picture {
        draft = draft.with_picture(PictureChoice::File(path.clone()));
    }
    draft.description = if args.fetch {
        Some(fetcher.fetch(&args.name).await?)
    } else {
        args.description.clone()
    };

    let name = repo.add_lake(&draft)?;
    println!("{} {name}", "Added".green());

    Ok(())
}

pub async fn edit(repo: &Repository, fetcher: &Fetcher, args: &EditArgs) -> CliResult<()> {
    let name = args.name.as_deref().unwrap_or(&args.old_name);

    let description = if args.fetch {
        fetcher.fetch(name).await?
    } else {
        match &args.description {
            Some(description) => description.clone(),
            None => repo.get(&args.old_name)?.description().clone(),
        }
    };

    let picture = match (&args.picture, args.reset_picture) {
        (Some(path), _) => PictureChoice::File(path.clone()),
        (None, true) => PictureChoice::Placeholder,
        (None, false) => PictureChoice::Keep,
    };

    let draft = LakeDraft::new(name)
        .with_picture(picture)
        .with_description(description);
    let stored = repo.edit_lake(&args.old_name, &draft)?;

    println!("{} {stored}", "Updated".green());

    Ok(())
}

pub fn delete(repo: &Repository, name: &str) -> CliResult<()> {
    repo.delete(name)?;
    println!("{} {name}", "Deleted".green());

    Ok(())
}

#[cfg(test)]
mod test {
    use lakes_lib::{CoreConfig, Error, NO_INFORMATION, repository::FetcherConfig};
    use tempfile::TempDir;

    use super::*;

    fn repo(dir: &TempDir) -> Repository {
        let mut cfg = CoreConfig::default();
        cfg.database.path = dir.path().join("lakes.db");

        Repository::from_config(cfg).unwrap()
    }

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetcherConfig::default()).unwrap()
    }

    fn add_args(name: &str) -> AddArgs {
        AddArgs {
            name: name.into(),
            picture: None,
            description: None,
            fetch: false,
        }
    }

    fn edit_args(old_name: &str) -> EditArgs {
        EditArgs {
            old_name: old_name.into(),
            name: None,
            picture: None,
            reset_picture: false,
            description: None,
            fetch: false,
        }
    }

    #[tokio::test]
    async fn test_add_defaults() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        add(&repo, &fetcher(), &add_args("Байкал")).await.unwrap();

        let lake = repo.get("Байкал").unwrap();
        assert_eq!(lake.description(), NO_INFORMATION);
        assert!(!lake.picture().is_empty());
    }

    #[tokio::test]
    async fn test_edit_keeps_description() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let args = AddArgs {
            description: Some("Глубочайшее озеро".into()),
            ..add_args("Байкал")
        };
        add(&repo, &fetcher(), &args).await.unwrap();

        let args = EditArgs {
            name: Some("Байкал-озеро".into()),
            ..edit_args("Байкал")
        };
        edit(&repo, &fetcher(), &args).await.unwrap();

        assert_eq!(
            repo.get("Байкал-озеро").unwrap().description(),
            "Глубочайшее озеро"
        );
        assert!(matches!(repo.get("Байкал"), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_edit_missing_lake() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        let err = edit(&repo, &fetcher(), &edit_args("Каспий"))
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Catalog(Error::NotFound(_))));
    }

    #[test]
    fn test_show_writes_picture() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.create("Байкал", b"picture", "Озеро").unwrap();
        let out = dir.path().join("baikal.png");

        show(&repo, "Байкал", Some(out.as_path())).unwrap();

        assert_eq!(fs::read(out).unwrap(), b"picture");
    }

    #[test]
    fn test_delete_missing_lake() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        assert!(matches!(
            delete(&repo, "Каспий"),
            Err(CliError::Catalog(Error::NotFound(_)))
        ));
    }
}
