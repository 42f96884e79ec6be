//! Home view: articles

use std::path::Path;

use anyhow::Context;
use kb_client::access::capability;
use kb_client::api::articles;
use serde_json::Value;
use shared::models::{Article, ArticleDraft};

use super::Console;
use crate::cli::ArticleCommand;
use crate::render;

pub async fn run(console: &Console, cmd: ArticleCommand) -> anyhow::Result<()> {
    console.mount(capability::VIEW_HOME)?;
    let api = console.client.articles();
    match cmd {
        ArticleCommand::List => {
            let list = api.list().await?;
            if console.json {
                return render::json(&serde_json::to_value(&list)?);
            }
            let rows: Vec<Vec<String>> = list
                .iter()
                .map(|a| {
                    vec![
                        a.slug.clone(),
                        a.title.clone(),
                        articles::hashtags(a).join(" "),
                        render::or_dash(a.updated_at.as_deref().or(a.created_at.as_deref())),
                    ]
                })
                .collect();
            render::table(&["Slug", "Title", "Hashtags", "Updated"], &rows);
            Ok(())
        }
        ArticleCommand::Show { slug } => {
            let article = api.get(&slug).await?;
            print_one(console, &article)
        }
        ArticleCommand::Create {
            title,
            slug,
            content,
            html,
            tag,
            category_id,
            subcategory_id,
        } => {
            let draft = ArticleDraft {
                title,
                slug,
                content: read_document(&content).await?,
                content_html: tokio::fs::read_to_string(&html)
                    .await
                    .with_context(|| format!("reading {}", html.display()))?,
                tags: tag,
                hashtags: Vec::new(),
                category_id,
                subcategory_id,
            };
            let article = api.create(draft).await?;
            println!("Article published at /{}", article.slug);
            print_one(console, &article)
        }
        ArticleCommand::Delete { slug } => {
            api.delete(&slug).await?;
            println!("Article \"{slug}\" deleted");
            Ok(())
        }
    }
}

async fn read_document(path: &Path) -> anyhow::Result<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a JSON document", path.display()))
}

fn print_one(console: &Console, article: &Article) -> anyhow::Result<()> {
    if console.json {
        return render::json(&serde_json::to_value(article)?);
    }
    render::fields(&[
        ("title", article.title.clone()),
        ("slug", article.slug.clone()),
        ("hashtags", articles::hashtags(article).join(" ")),
        ("created", render::or_dash(article.created_at.as_deref())),
    ]);
    println!();
    println!("{}", render::document_text(&article.document()));
    Ok(())
}
