//! Subcommand handlers

use std::io::Write;

use folio::{ClaimsService, Confirmation, Error, Result, Session, Step};
use folio_core::{ClaimInput, ClaimPatch, ProfileStore, SlotStorage};
use folio_remote::ClaimsBackend;
use tracing::info;

use crate::output;
use crate::{ClaimFields, Command};

/// Everything a command runs against.
pub struct Context<B, S> {
    pub service: ClaimsService<B, S>,
    pub profile: ProfileStore<S>,
    pub session: Session,
}

impl ClaimFields {
    fn into_input(self) -> Result<ClaimInput> {
        let required = |value: Option<String>, flag: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::InvalidInput(format!("--{} is required", flag)))
        };

        Ok(ClaimInput {
            subject: required(self.subject, "subject")?,
            claim_type: required(self.claim_type, "type")?,
            statement: required(self.statement, "statement")?,
            effective_date: required(self.date, "date")?,
            how_known: self.how_known.unwrap_or_default(),
            stars: self.stars,
            score: self.score,
            aspect: self.aspect,
        })
    }

    fn into_patch(self) -> ClaimPatch {
        ClaimPatch {
            subject: self.subject,
            claim_type: self.claim_type,
            statement: self.statement,
            effective_date: self.date,
            how_known: self.how_known,
            stars: self.stars,
            score: self.score,
            aspect: self.aspect,
        }
    }
}

fn confirmation(yes: bool) -> Confirmation {
    if yes {
        Confirmation::Confirmed
    } else {
        Confirmation::Pending
    }
}

pub async fn run<B, S>(ctx: &mut Context<B, S>, command: Command, out: &mut impl Write) -> Result<()>
where
    B: ClaimsBackend,
    S: SlotStorage,
{
    match command {
        Command::List { subject } => {
            let loaded = match subject {
                Some(subject) => ctx.service.load_by_subject(&ctx.session, &subject).await,
                None => ctx.service.load_claims(&ctx.session).await,
            };
            output::write_loaded(out, &loaded)?;
        }

        Command::Add { fields, local } => {
            let input = fields.into_input()?;
            let claim = if local {
                ctx.service.create_claim_locally(input)?
            } else {
                match ctx.service.create_claim(&ctx.session, input).await {
                    Ok(claim) => claim,
                    Err(e) => {
                        if e.local_fallback_available() {
                            writeln!(out, "hint: rerun with --local to keep the claim on this machine")?;
                        }
                        return Err(e.into());
                    }
                }
            };
            writeln!(out, "created claim {}", claim.id)?;
            output::write_claim(out, &claim)?;
        }

        Command::Edit { id, fields } => {
            let patch = fields.into_patch();
            if patch.is_empty() {
                return Err(Error::InvalidInput("nothing to change".into()));
            }
            ctx.service.load_claims(&ctx.session).await;
            if ctx.service.update_claim(&ctx.session, id, &patch).await? {
                writeln!(out, "updated claim {}", id)?;
            } else {
                writeln!(out, "no claim {}", id)?;
            }
        }

        Command::Remove { id, yes } => {
            ctx.service.load_claims(&ctx.session).await;
            let step = ctx
                .service
                .delete_claim(&ctx.session, id, confirmation(yes))
                .await?;
            match step {
                Step::ConfirmationRequired(request) => {
                    writeln!(out, "{} (rerun with --yes to confirm)", request)?
                }
                Step::Done(true) => writeln!(out, "deleted claim {}", id)?,
                Step::Done(false) => writeln!(out, "no claim {}", id)?,
                Step::Cancelled => writeln!(out, "cancelled")?,
            }
        }

        Command::Import { file, yes } => {
            let raw = std::fs::read_to_string(&file)?;
            ctx.service.load_claims(&ctx.session).await;
            match ctx.service.import_claims(&raw, confirmation(yes))? {
                Step::ConfirmationRequired(request) => {
                    writeln!(out, "{} (rerun with --yes to confirm)", request)?
                }
                Step::Done(outcome) => writeln!(
                    out,
                    "imported {} claims ({} stored locally)",
                    outcome.imported.len(),
                    outcome.total
                )?,
                Step::Cancelled => writeln!(out, "cancelled")?,
            }
        }

        Command::Export { out: dir } => {
            ctx.service.load_claims(&ctx.session).await;
            let export = ctx.service.export();
            let document = &export.document;
            let json = document.to_json_pretty()?;
            let source = export
                .provenance
                .map(output::source_label)
                .unwrap_or("nowhere");

            match dir {
                Some(dir) => {
                    std::fs::create_dir_all(&dir)?;
                    let path = dir.join(document.file_name());
                    std::fs::write(&path, json)?;
                    info!("Wrote {}", path.display());
                    writeln!(
                        out,
                        "exported {} claims from {} to {}",
                        document.claims().len(),
                        source,
                        path.display()
                    )?;
                }
                None => writeln!(out, "{}", json)?,
            }
        }

        Command::Stats => {
            ctx.service.load_claims(&ctx.session).await;
            let summary = ctx
                .service
                .snapshot()
                .map(|s| s.summary)
                .unwrap_or_default();
            output::write_summary(out, &summary)?;
        }

        Command::Profile { name, bio } => {
            let mut settings = ctx.profile.load();
            if name.is_some() || bio.is_some() {
                if let Some(name) = name {
                    settings.display_name = name;
                }
                if let Some(bio) = bio {
                    settings.bio = bio;
                }
                ctx.profile.save(&settings)?;
            }
            output::write_profile(out, &settings)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{LocalClaimStore, MemorySlots};
    use folio_remote::{RemoteClient, RemoteConfig};
    use std::sync::Arc;

    type TestContext = Context<RemoteClient, Arc<MemorySlots>>;

    /// Anonymous session, so the backend (pointed at a closed port) is
    /// never contacted.
    fn context() -> TestContext {
        let slots = Arc::new(MemorySlots::new());
        let backend = RemoteClient::new(RemoteConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        })
        .unwrap();

        Context {
            service: ClaimsService::new(backend, LocalClaimStore::new(slots.clone())),
            profile: ProfileStore::new(slots),
            session: Session::anonymous(),
        }
    }

    fn fields(statement: &str, stars: u8) -> ClaimFields {
        ClaimFields {
            subject: Some("example.com/me".into()),
            claim_type: Some("HAS_SKILL".into()),
            statement: Some(statement.into()),
            date: Some("2024-01-01".into()),
            stars: Some(stars),
            aspect: Some("skill".into()),
            ..Default::default()
        }
    }

    async fn exec(ctx: &mut TestContext, command: Command) -> Result<String> {
        let mut out = Vec::new();
        run(ctx, command, &mut out).await?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let mut ctx = context();
        let added = exec(
            &mut ctx,
            Command::Add {
                fields: fields("Rust", 5),
                local: false,
            },
        )
        .await
        .unwrap();
        assert!(added.starts_with("created claim"));

        let listed = exec(&mut ctx, Command::List { subject: None }).await.unwrap();
        assert!(listed.contains("Rust"));
        assert!(listed.contains("1 claims from local storage"));
    }

    #[tokio::test]
    async fn test_add_requires_fields() {
        let mut ctx = context();
        let err = exec(
            &mut ctx,
            Command::Add {
                fields: ClaimFields::default(),
                local: true,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg.contains("--subject")));
    }

    #[tokio::test]
    async fn test_edit() {
        let mut ctx = context();
        let claim = ctx
            .service
            .create_claim_locally(fields("Rust", 2).into_input().unwrap())
            .unwrap();

        let err = exec(
            &mut ctx,
            Command::Edit {
                id: claim.id,
                fields: ClaimFields::default(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let text = exec(
            &mut ctx,
            Command::Edit {
                id: claim.id,
                fields: ClaimFields {
                    stars: Some(5),
                    ..Default::default()
                },
            },
        )
        .await
        .unwrap();
        assert_eq!(text.trim(), format!("updated claim {}", claim.id));
        assert_eq!(ctx.service.local().get(claim.id).unwrap().score, Some(1.0));
    }

    #[tokio::test]
    async fn test_remove_needs_yes() {
        let mut ctx = context();
        let claim = ctx
            .service
            .create_claim_locally(fields("Rust", 4).into_input().unwrap())
            .unwrap();

        let prompt = exec(&mut ctx, Command::Remove { id: claim.id, yes: false })
            .await
            .unwrap();
        assert!(prompt.contains("rerun with --yes"));
        assert_eq!(ctx.service.local().list().len(), 1);

        let done = exec(&mut ctx, Command::Remove { id: claim.id, yes: true })
            .await
            .unwrap();
        assert!(done.starts_with("deleted claim"));
        assert!(ctx.service.local().list().is_empty());
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let mut ctx = context();
        ctx.service
            .create_claim_locally(fields("Rust", 4).into_input().unwrap())
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let text = exec(
            &mut ctx,
            Command::Export {
                out: Some(dir.path().to_path_buf()),
            },
        )
        .await
        .unwrap();
        assert!(text.starts_with("exported 1 claims from local storage"));

        let file = std::fs::read_dir(dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .path();
        let name = file.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("claims-") && name.ends_with(".json"));

        let prompt = exec(
            &mut ctx,
            Command::Import {
                file: file.clone(),
                yes: false,
            },
        )
        .await
        .unwrap();
        assert!(prompt.starts_with("Import 1 claim into local storage?"));

        let done = exec(&mut ctx, Command::Import { file, yes: true })
            .await
            .unwrap();
        assert_eq!(done.trim(), "imported 1 claims (2 stored locally)");
    }

    #[tokio::test]
    async fn test_stats() {
        let mut ctx = context();
        for (statement, stars) in [("a", 5), ("b", 5), ("c", 3)] {
            ctx.service
                .create_claim_locally(fields(statement, stars).into_input().unwrap())
                .unwrap();
        }

        let text = exec(&mut ctx, Command::Stats).await.unwrap();
        assert!(text.contains("claims:         3"));
        assert!(text.contains("average rating: 4.3"));
        assert!(text.contains("skill"));
    }

    #[tokio::test]
    async fn test_profile() {
        let mut ctx = context();
        let shown = exec(&mut ctx, Command::Profile { name: None, bio: None })
            .await
            .unwrap();
        assert!(shown.contains("name: (not set)"));

        exec(
            &mut ctx,
            Command::Profile {
                name: Some("Alice".into()),
                bio: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(ctx.profile.load().display_name, "Alice");
    }
}
