use baas_http::{Object, ObjectMeta, Results, Session};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize)]
struct GameScore {
    score: i64,
    player_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut session = Session::from_env()?;

    if let (Ok(username), Ok(password)) = (
        std::env::var("BAAS_USERNAME"),
        std::env::var("BAAS_PASSWORD"),
    ) {
        let user = session.login(&username, &password).await?;
        println!("logged in as {:?}", user.username);
    }

    let scores = session.class("GameScore");

    let created: ObjectMeta = scores
        .create(&GameScore {
            score: 1337,
            player_name: "Sean Plott".to_owned(),
        })
        .await?;
    let object_id = created.object_id.unwrap_or_default();

    let score: Object<GameScore> = scores.select(&object_id).await?;
    println!("{score:?}");

    let top: Results<Object<GameScore>> = scores
        .select_query(&json!({ "score": { "$gte": 1000 } }))
        .await?;
    for row in top.results {
        println!("{row:?}");
    }

    match scores.delete(&object_id).await {
        Err(err) if err.is_object_not_found() => println!("already gone"),
        other => other?,
    }

    Ok(())
}
