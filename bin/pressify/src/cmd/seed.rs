//! Seed command - insert sample content into the CMS
//!
//! Bootstraps a development CMS instance over its REST API: resolves or
//! creates the referenced categories and tags, then creates each sample post
//! unless one with the same title already exists. Content entities are still
//! owned by the CMS; this writes through its own surface, never through the
//! gateway.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use pressify_core::{CmsConfig, Config};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// One sample post to insert.
#[derive(Debug, Clone)]
pub struct SamplePost {
    pub title: &'static str,
    pub content: &'static str,
    pub categories: &'static [&'static str],
    pub tags: &'static [&'static str],
}

/// The fixed sample content set.
pub const SAMPLE_POSTS: &[SamplePost] = &[
    SamplePost {
        title: "Preventive Care: Acting Before Symptoms Appear",
        content: "<h2>Why prevention matters</h2>\
<p>Most chronic conditions build up quietly for years before the first \
symptom shows. Acting in that window is cheaper, easier and far more \
effective than treating an established illness.</p>\
<h3>Three stages of early decline</h3>\
<ol>\
<li><strong>No symptoms</strong> - risk factors are present but silent</li>\
<li><strong>Mild signals</strong> - occasional fatigue or discomfort</li>\
<li><strong>Clear signals</strong> - recurring problems that interfere with daily life</li>\
</ol>\
<p>This site collects practical habits that help at every stage.</p>",
        categories: &["Preventive Care"],
        tags: &["prevention", "self-care"],
    },
    SamplePost {
        title: "Everyday Nutrition for Long-Term Health",
        content: "<h2>Food as the foundation</h2>\
<p>What lands on the plate every day shapes health more than any \
supplement. Seasonal ingredients and variety do most of the work.</p>\
<h3>Eating across the spectrum</h3>\
<ul>\
<li>Red: tomatoes, carrots</li>\
<li>Yellow: squash, eggs</li>\
<li>Green: spinach, broccoli</li>\
<li>Dark: beans, seaweed</li>\
<li>White: radish, tofu</li>\
</ul>",
        categories: &["Nutrition"],
        tags: &["food", "nutrition"],
    },
    SamplePost {
        title: "Why Movement Matters More Than Workouts",
        content: "<h2>Exercise and health</h2>\
<p>Regular movement is the basis of physical and mental resilience.</p>\
<h3>What it buys you</h3>\
<ul>\
<li>Better circulation</li>\
<li>Muscle maintenance</li>\
<li>Lower stress</li>\
<li>Improved sleep quality</li>\
</ul>\
<p>Consistency beats intensity: a short daily walk outperforms a \
sporadic gym session.</p>",
        categories: &["Exercise"],
        tags: &["exercise", "fitness"],
    },
    SamplePost {
        title: "What Good Sleep Actually Does",
        content: "<h2>Sleep and recovery</h2>\
<p>Sleep is when the body and mind repair themselves.</p>\
<h3>Improving sleep quality</h3>\
<ol>\
<li>Keep consistent bed and wake times</li>\
<li>Reduce screen time an hour before bed</li>\
<li>Keep the bedroom dark and cool</li>\
<li>Avoid caffeine late in the day</li>\
</ol>\
<p>Adults generally need seven to eight hours a night.</p>",
        categories: &["Sleep"],
        tags: &["sleep", "recovery"],
    },
    SamplePost {
        title: "Managing Stress Before It Manages You",
        content: "<h2>Stress and health</h2>\
<p>Stress itself is unavoidable; what matters is how it is handled.</p>\
<h3>Practices that help</h3>\
<ul>\
<li>Short daily breathing exercises</li>\
<li>Time outdoors</li>\
<li>Writing down worries before bed</li>\
</ul>",
        categories: &["Stress"],
        tags: &["stress", "mindfulness"],
    },
];

/// Taxonomy kind on the REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TermKind {
    Category,
    Tag,
}

impl TermKind {
    fn endpoint(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Tag => "tags",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RemoteTerm {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Rendered {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct RemotePost {
    id: i64,
    title: Rendered,
}

/// Authenticated client for the CMS REST surface.
struct SeedClient {
    http: reqwest::Client,
    rest_url: String,
    user: String,
    password: String,
}

impl SeedClient {
    fn new(cms: &CmsConfig) -> Result<Self> {
        let rest_url = cms
            .rest_url
            .as_deref()
            .ok_or_else(|| eyre!("cms.rest_url must be set to seed content"))?
            .trim_end_matches('/')
            .to_string();
        let (user, password) = match (&cms.basic_auth_user, &cms.basic_auth_password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => bail!("seeding writes to the CMS and requires basic auth credentials"),
        };

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(cms.timeout_secs))
            .user_agent(cms.user_agent.clone());
        if cms.allow_insecure_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().wrap_err("failed to build HTTP client")?;

        Ok(Self {
            http,
            rest_url,
            user,
            password,
        })
    }

    /// Whether a post with exactly this title already exists.
    async fn post_exists(&self, title: &str) -> Result<bool> {
        let url = format!("{}/wp/v2/posts", self.rest_url);
        let posts: Vec<RemotePost> = self
            .http
            .get(&url)
            .basic_auth(&self.user, Some(&self.password))
            .query(&[("search", title), ("status", "publish")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(posts.iter().any(|p| p.title.rendered == title))
    }

    /// Resolve a term id by name, creating the term when it does not exist.
    async fn ensure_term(&self, kind: TermKind, name: &str) -> Result<i64> {
        let url = format!("{}/wp/v2/{}", self.rest_url, kind.endpoint());

        let existing: Vec<RemoteTerm> = self
            .http
            .get(&url)
            .basic_auth(&self.user, Some(&self.password))
            .query(&[("search", name)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if let Some(term) = existing.iter().find(|t| t.name == name) {
            debug!(name, id = term.id, kind = kind.endpoint(), "term exists");
            return Ok(term.id);
        }

        let created: RemoteTerm = self
            .http
            .post(&url)
            .basic_auth(&self.user, Some(&self.password))
            .json(&json!({ "name": name }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(name, id = created.id, kind = kind.endpoint(), "term created");
        Ok(created.id)
    }

    /// Create one published post.
    async fn create_post(
        &self,
        post: &SamplePost,
        category_ids: &[i64],
        tag_ids: &[i64],
    ) -> Result<i64> {
        let url = format!("{}/wp/v2/posts", self.rest_url);
        let created: RemotePost = self
            .http
            .post(&url)
            .basic_auth(&self.user, Some(&self.password))
            .json(&json!({
                "title": post.title,
                "content": post.content,
                "status": "publish",
                "categories": category_ids,
                "tags": tag_ids,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created.id)
    }
}

/// Run the seed command.
pub async fn run(config_path: &Path, dry_run: bool) -> Result<()> {
    let config = Config::load_with_env(config_path)?;
    let client = SeedClient::new(&config.cms)?;

    let mut created = 0;
    let mut skipped = 0;
    // Terms are shared across sample posts; resolve each name once.
    let mut term_ids: HashMap<(TermKind, &str), i64> = HashMap::new();

    for post in SAMPLE_POSTS {
        if client
            .post_exists(post.title)
            .await
            .wrap_err_with(|| format!("checking for existing post \"{}\"", post.title))?
        {
            println!("  - skipping existing: {}", post.title);
            skipped += 1;
            continue;
        }

        if dry_run {
            println!("  + would create: {}", post.title);
            created += 1;
            continue;
        }

        let mut category_ids = Vec::with_capacity(post.categories.len());
        for &name in post.categories {
            let id = match term_ids.get(&(TermKind::Category, name)) {
                Some(id) => *id,
                None => {
                    let id = client.ensure_term(TermKind::Category, name).await?;
                    term_ids.insert((TermKind::Category, name), id);
                    id
                }
            };
            category_ids.push(id);
        }

        let mut tag_ids = Vec::with_capacity(post.tags.len());
        for &name in post.tags {
            let id = match term_ids.get(&(TermKind::Tag, name)) {
                Some(id) => *id,
                None => {
                    let id = client.ensure_term(TermKind::Tag, name).await?;
                    term_ids.insert((TermKind::Tag, name), id);
                    id
                }
            };
            tag_ids.push(id);
        }

        let id = client
            .create_post(post, &category_ids, &tag_ids)
            .await
            .wrap_err_with(|| format!("creating post \"{}\"", post.title))?;
        println!("  ✓ created {} (id {id})", post.title);
        created += 1;
    }

    println!();
    if dry_run {
        println!("Dry run: {created} post(s) would be created, {skipped} already exist");
    } else {
        println!("Seeded {created} post(s), skipped {skipped} existing");
    }

    Ok(())
}
