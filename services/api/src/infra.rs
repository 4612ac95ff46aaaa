use event_amplify::config::SeedConfig;
use event_amplify::error::AppError;
use event_amplify::workflows::catalog::{
    Article, Brandkey, BrandkeyProduct, ChannelGroup, InMemoryStore, Product, Question, Schedule,
};
use event_amplify::workflows::events::Event;
use event_amplify::workflows::seed::ChannelGroupImporter;
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Cursor;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

/// Channel groups used when no seed file is configured.
pub(crate) const SAMPLE_CHANNEL_GROUPS: &str = "id,name,type,point\n\
    1,Keynote speaker,ROLE,40\n\
    2,Panelist,ROLE,30\n\
    3,Guest,ROLE,20\n\
    4,Attendee,ROLE,10\n\
    11,Ministry guests,INVITEE,40\n\
    12,Partners,INVITEE,20\n\
    13,Students,INVITEE,10\n\
    21,National,SCALE,30\n\
    22,Regional,SCALE,20\n\
    23,Campus,SCALE,5\n";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ChannelGroupStore = InMemoryStore<ChannelGroup>;
pub(crate) type EventStore = InMemoryStore<Event>;

/// One in-memory store per resource, shared between the routers.
#[derive(Clone, Default)]
pub(crate) struct Stores {
    pub(crate) channel_groups: Arc<ChannelGroupStore>,
    pub(crate) events: Arc<EventStore>,
    pub(crate) questions: Arc<InMemoryStore<Question>>,
    pub(crate) products: Arc<InMemoryStore<Product>>,
    pub(crate) brandkeys: Arc<InMemoryStore<Brandkey>>,
    pub(crate) brandkey_products: Arc<InMemoryStore<BrandkeyProduct>>,
    pub(crate) schedules: Arc<InMemoryStore<Schedule>>,
    pub(crate) articles: Arc<InMemoryStore<Article>>,
}

impl Stores {
    /// Empty stores with channel groups loaded from the configured seed file, or the
    /// sample set when none is configured.
    pub(crate) fn seeded(seed: &SeedConfig) -> Result<Self, AppError> {
        let stores = Self::default();
        let count = load_channel_groups(seed, stores.channel_groups.as_ref())?;
        info!(count, "channel group reference data ready");
        Ok(stores)
    }
}

/// Which source the channel group reference data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeedSource {
    File,
    Sample,
}

pub(crate) fn load_channel_groups(
    seed: &SeedConfig,
    store: &ChannelGroupStore,
) -> Result<usize, AppError> {
    let (count, _) = load_channel_groups_from(seed, store)?;
    Ok(count)
}

pub(crate) fn load_channel_groups_from(
    seed: &SeedConfig,
    store: &ChannelGroupStore,
) -> Result<(usize, SeedSource), AppError> {
    match &seed.channel_groups_csv {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            let count = ChannelGroupImporter::import_into(file, store)?;
            Ok((count, SeedSource::File))
        }
        None => {
            let count =
                ChannelGroupImporter::import_into(Cursor::new(SAMPLE_CHANNEL_GROUPS), store)?;
            Ok((count, SeedSource::Sample))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_amplify::workflows::catalog::{ChannelGroupLookup, EntityId, EntityRepository};

    #[test]
    fn sample_seed_loads_every_group() {
        let stores = Stores::seeded(&SeedConfig::default()).expect("sample seed loads");

        assert_eq!(stores.channel_groups.list().expect("list").len(), 10);
        assert_eq!(
            stores
                .channel_groups
                .get(EntityId(21))
                .expect("national scale")
                .point,
            30
        );
    }

    #[test]
    fn missing_seed_file_is_an_io_error() {
        let seed = SeedConfig {
            channel_groups_csv: Some("does/not/exist.csv".into()),
        };
        let store = ChannelGroupStore::default();

        assert!(matches!(
            load_channel_groups_from(&seed, &store),
            Err(AppError::Io(_))
        ));
    }
}
