//! Sample data loaded on every process start.
//!
//! The follower, following and like ids deliberately include ids with no
//! matching user. Counts include them; listings drop them.

use agora_types::{
    MediaKind, NewPost, Post, PostId, Timestamp, User, UserFields, UserId, ValidationError,
};

use crate::collections::Collections;
use crate::memory::InMemoryEntityStore;

struct SeedUser {
    username: &'static str,
    email: &'static str,
    bio: &'static str,
    image: &'static str,
    followers: &'static [u64],
    following: &'static [u64],
}

struct SeedPost {
    author: u64,
    content: &'static str,
    media_url: &'static str,
    kind: MediaKind,
    likes: &'static [u64],
}

const USERS: &[SeedUser] = &[
    SeedUser {
        username: "Aish",
        email: "aish229@example.com",
        bio: "AI Engineer",
        image: "https://i.postimg.cc/853wwdYp/image.jpg",
        followers: &[900],
        following: &[90],
    },
    SeedUser {
        username: "Riya",
        email: "Riya_raj@example.com",
        bio: "Web Developer",
        image: "https://i.postimg.cc/WbDmXJmz/girl.jpg",
        followers: &[100],
        following: &[40],
    },
    SeedUser {
        username: "Gopal",
        email: "dharmaraj@example.com",
        bio: "Full Stack Developer",
        image: "https://i.postimg.cc/J4xNJhwn/boy.webp",
        followers: &[1000],
        following: &[40],
    },
];

const POSTS: &[SeedPost] = &[
    SeedPost {
        author: 1,
        content: "Hello world! Excited To work First Day In office.",
        media_url: "https://i.postimg.cc/MGMQ50bp/pexels-goumbik-669619.jpg",
        kind: MediaKind::Image,
        likes: &[1000],
    },
    SeedPost {
        author: 2,
        content: "Today I Saw A Beautiful Sunset.",
        media_url: "https://i.postimg.cc/YqrtMpP6/sunset.jpg",
        kind: MediaKind::Image,
        likes: &[1],
    },
    SeedPost {
        author: 3,
        content: "Meet My Crime Partner",
        media_url: "https://files.catbox.moe/r25eh3.mp4",
        kind: MediaKind::Video,
        likes: &[100],
    },
];

/// Build the sample collections. All posts share one creation timestamp.
pub fn sample_collections() -> Result<Collections, ValidationError> {
    let mut collections = Collections::new();

    for seed in USERS {
        let profile = UserFields::new(seed.username, seed.email)
            .with_bio(seed.bio)
            .with_profile_image(seed.image)
            .validate()?;
        let mut user = User::new(collections.next_user_id(), profile);
        user.followers.extend(seed.followers.iter().copied().map(UserId::new));
        user.following.extend(seed.following.iter().copied().map(UserId::new));
        collections.restore_user(user);
    }

    let created = Timestamp::now();
    for seed in POSTS {
        let draft = NewPost::text(UserId::new(seed.author), seed.content)
            .with_media(seed.media_url, Some(seed.kind))
            .validate()?;
        let id: PostId = collections.next_post_id();
        let mut post = Post::new(id, draft, created);
        post.likes.extend(seed.likes.iter().copied().map(UserId::new));
        collections.restore_post(post);
    }

    tracing::debug!(
        users = collections.user_count(),
        posts = collections.post_count(),
        "sample data built"
    );
    Ok(collections)
}

/// A store pre-loaded with [`sample_collections`].
pub fn sample_store() -> Result<InMemoryEntityStore, ValidationError> {
    sample_collections().map(InMemoryEntityStore::from_collections)
}
