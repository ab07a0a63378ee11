//! Selection of the source projects to migrate
use crate::config::Settings;
use crate::errors::TransferError;
use crate::platform::{Project, ProjectQuery, SourcePlatform};

/// List the projects eligible for migration: every private project the user
/// can see followed by the selected public ones, minus the excluded ids.
///
/// Projects appearing in both listings are kept twice.
/// # Errors
/// Error if the source platform can't list the projects
pub async fn list_migratable_projects(
    source: &dyn SourcePlatform,
    settings: &Settings,
) -> Result<Vec<Project>, TransferError> {
    let mut projects = source.list_projects(ProjectQuery::Private).await?;
    let private_count = projects.len();
    projects.extend(source.list_projects(settings.public_projects).await?);
    log::debug!(
        "Source lists {} private and {} public projects",
        private_count,
        projects.len() - private_count
    );
    let projects: Vec<Project> = projects
        .into_iter()
        .filter(|project| {
            let excluded = settings.excluded_ids.contains(&project.id);
            if excluded {
                log::debug!("Excluding {} ({})", project.name, project.id);
            }
            !excluded
        })
        .collect();
    Ok(projects)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::platform::test::FakeSource;
    use std::collections::HashSet;

    #[tokio::test]
    async fn private_then_public_in_platform_order() {
        let source = FakeSource::new("alice")
            .with_private(&[(3, "gamma", "alice"), (1, "alpha", "bob")])
            .with_public(&[(2, "beta", "alice")]);
        let projects = list_migratable_projects(&source, &Settings::default())
            .await
            .unwrap();
        let ids: Vec<u64> = projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn excluded_ids_are_dropped() {
        let source = FakeSource::new("alice")
            .with_private(&[(988, "secret", "alice"), (1, "alpha", "alice")])
            .with_public(&[(952, "site", "alice"), (2, "beta", "alice")]);
        let settings = Settings {
            excluded_ids: HashSet::from([988, 952]),
            ..Default::default()
        };
        let projects = list_migratable_projects(&source, &settings).await.unwrap();
        let ids: Vec<u64> = projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let source = FakeSource::new("alice")
            .with_private(&[(1, "alpha", "alice")])
            .with_public(&[(1, "alpha", "alice")]);
        let projects = list_migratable_projects(&source, &Settings::default())
            .await
            .unwrap();
        assert_eq!(projects.len(), 2);
    }

    #[tokio::test]
    async fn public_query_follows_settings() {
        let source = FakeSource::new("alice");
        let settings = Settings {
            public_projects: ProjectQuery::PublicOwned,
            ..Default::default()
        };
        list_migratable_projects(&source, &settings).await.unwrap();
        assert_eq!(
            source.queries(),
            vec![ProjectQuery::Private, ProjectQuery::PublicOwned]
        );
        let source = FakeSource::new("alice");
        list_migratable_projects(&source, &Settings::default())
            .await
            .unwrap();
        assert_eq!(
            source.queries(),
            vec![ProjectQuery::Private, ProjectQuery::PublicWithAccess(30)]
        );
    }
}
