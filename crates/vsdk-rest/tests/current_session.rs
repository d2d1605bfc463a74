//! Entity methods delegating to the current session.
//!
//! The current session is process-wide, so everything runs in one test.

mod common;

use std::sync::Arc;
use vsdk_rest::prelude::*;
use vsdk_rest::{clear_current_session, RestError};

#[tokio::test]
async fn test_models_use_current_session() -> anyhow::Result<()> {
    let mut orphan = MetadataTag {
        id: "metadatatags-1".to_string(),
        ..Default::default()
    };
    assert!(matches!(orphan.fetch().await, Err(RestError::NoCurrentSession)));

    let (controller, config) = common::spawn().await;
    let session = Arc::new(Session::new(config)?);
    session.start().await?;
    session.set_current();
    assert!(Arc::ptr_eq(&current_session()?, &session));

    let me = session.root()?;
    let mut enterprise = Enterprise {
        name: "acme".to_string(),
        ..Default::default()
    };
    me.create_enterprise(&mut enterprise).await?;

    let mut tag = MetadataTag::new("web");
    enterprise.create_metadata_tag(&mut tag).await?;
    assert_eq!(enterprise.metadata_tags(None).await?, vec![tag.clone()]);
    assert_eq!(me.metadata_tags(None).await?.len(), 1);

    let mut metadata = Metadata {
        name: "owner".to_string(),
        blob: "team=web".to_string(),
        metadata_tag_ids: vec![tag.id.clone()],
        ..Default::default()
    };
    tag.create_metadata(&mut metadata).await?;
    assert_eq!(tag.metadatas(None).await?, vec![metadata.clone()]);

    tag.description = "web tier".to_string();
    tag.save().await?;

    let mut reloaded = MetadataTag {
        id: tag.id.clone(),
        ..Default::default()
    };
    reloaded.fetch().await?;
    assert_eq!(reloaded.description, "web tier");

    tag.delete().await?;
    assert!(reloaded.fetch().await.unwrap_err().is_not_found());
    assert!(controller.objects("metadatatags").is_empty());

    let previous = clear_current_session().expect("session was installed");
    assert!(Arc::ptr_eq(&previous, &session));
    assert!(matches!(tag.save().await, Err(RestError::NoCurrentSession)));
    Ok(())
}
