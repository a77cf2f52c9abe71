#[cfg(test)]
pub const POST_DATA: &str = r#"---
title: "What I learned after 20+ years of software development"
date: 2022-04-02T12:05:00Z
draft: false
author: thiago
tags: software, career
categories: [Career]
---

How to be a great software engineer?

Someone asked me this question today and I didn’t have an answer.

## Non technical

You finished university and learned a lot. You solved many hard problems. This will drive you to improve yourself as you now recognize better your weakest points.
"#;

#[cfg(test)]
pub const POST_BODY_MD: &str = r#"How to be a great software engineer?

## Non technical

You finished university and learned a lot. __The earlier you find that, the better.__

- be honest
- keep *learning*

1. read [the blog](https://thiagocafe.com)
2. write code

An image: ![diagram](image.png)

```rust
let x = 1;
```

Use `cargo` daily.
"#;

#[cfg(test)]
pub const DRAFT_POST: &str = r#"---
title: 'Work in progress'
date: not a date
draft: "TRUE"
---

Nothing to see here yet.
"#;
