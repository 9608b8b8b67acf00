//! GraphQL query documents sent to the CMS.
//!
//! Field sets are fixed: callers always receive the full projection and the
//! wire module reshapes it into the core content types. The post field set is
//! repeated per document so each stays a valid standalone query.

/// List published posts, newest first, with optional category and search
/// filters and cursor pagination.
pub const POSTS: &str = r#"query GetPosts($first: Int!, $after: String, $categoryIn: [ID], $search: String) {
  posts(
    first: $first
    after: $after
    where: {
      categoryIn: $categoryIn
      search: $search
      status: PUBLISH
      orderby: { field: DATE, order: DESC }
    }
  ) {
    pageInfo {
      hasNextPage
      endCursor
    }
    nodes {
      id
      databaseId
      date
      modified
      slug
      status
      title
      content
      excerpt
      author {
        node {
          id
          name
          avatar {
            url
          }
        }
      }
      featuredImage {
        node {
          sourceUrl
          altText
          mediaDetails {
            width
            height
          }
        }
      }
      categories {
        nodes {
          id
          databaseId
          name
          slug
        }
      }
      tags {
        nodes {
          id
          name
          slug
        }
      }
    }
  }
}"#;

/// Fetch one post by slug.
pub const POST_BY_SLUG: &str = r#"query GetPostBySlug($slug: ID!) {
  post(id: $slug, idType: SLUG) {
    id
    databaseId
    date
    modified
    slug
    status
    title
    content
    excerpt
    author {
      node {
        id
        name
        avatar {
          url
        }
      }
    }
    featuredImage {
      node {
        sourceUrl
        altText
        mediaDetails {
          width
          height
        }
      }
    }
    categories {
      nodes {
        id
        databaseId
        name
        slug
      }
    }
    tags {
      nodes {
        id
        name
        slug
      }
    }
  }
}"#;

/// Fetch one post by numeric CMS id.
pub const POST_BY_ID: &str = r#"query GetPostById($id: ID!) {
  post(id: $id, idType: DATABASE_ID) {
    id
    databaseId
    date
    modified
    slug
    status
    title
    content
    excerpt
    author {
      node {
        id
        name
        avatar {
          url
        }
      }
    }
    featuredImage {
      node {
        sourceUrl
        altText
        mediaDetails {
          width
          height
        }
      }
    }
    categories {
      nodes {
        id
        databaseId
        name
        slug
      }
    }
    tags {
      nodes {
        id
        name
        slug
      }
    }
  }
}"#;

/// List categories that have at least one published post.
pub const CATEGORIES: &str = r#"query GetCategories($first: Int!) {
  categories(first: $first, where: { hideEmpty: true }) {
    nodes {
      id
      databaseId
      count
      description
      name
      slug
    }
  }
}"#;

/// List tags that have at least one published post.
pub const TAGS: &str = r#"query GetTags($first: Int!) {
  tags(first: $first, where: { hideEmpty: true }) {
    nodes {
      id
      databaseId
      count
      description
      name
      slug
    }
  }
}"#;

/// Fetch one static page by its URI slug.
pub const PAGE_BY_SLUG: &str = r#"query GetPageBySlug($slug: ID!) {
  page(id: $slug, idType: URI) {
    id
    databaseId
    date
    modified
    slug
    status
    title
    content
    featuredImage {
      node {
        sourceUrl
        altText
        mediaDetails {
          width
          height
        }
      }
    }
  }
}"#;

/// List published static pages.
pub const PAGES: &str = r#"query GetPages($first: Int!) {
  pages(first: $first, where: { status: PUBLISH }) {
    nodes {
      id
      databaseId
      date
      modified
      slug
      status
      title
      content
      featuredImage {
        node {
          sourceUrl
          altText
          mediaDetails {
            width
            height
          }
        }
      }
    }
  }
}"#;
