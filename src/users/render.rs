use super::repo::User;

/// The single server-rendered page: an add form plus one table row per user
/// with inline update form and delete link.
pub fn listing_page(users: &[User]) -> String {
    let mut rows = String::new();
    for user in users {
        let picture = match &user.profile_picture {
            Some(file) => format!(
                r#"<img src="/uploads/{}" alt="profile picture" width="64">"#,
                escape(file)
            ),
            None => "&mdash;".to_string(),
        };
        rows.push_str(&format!(
            r#"<tr>
  <td>{id}</td>
  <td>{name}</td>
  <td>{email}</td>
  <td>{picture}</td>
  <td>
    <form method="post" action="/update/{id}">
      <input type="text" name="name" value="{name}" required>
      <input type="email" name="email" value="{email}" required>
      <button type="submit">Update</button>
    </form>
    <a href="/delete/{id}">Delete</a>
  </td>
</tr>
"#,
            id = user.id,
            name = escape(&user.name),
            email = escape(&user.email),
            picture = picture,
        ));
    }

    format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>User Directory</title></head>
<body>
<h1>User Directory</h1>
<form method="post" action="/add" enctype="multipart/form-data">
  <input type="text" name="name" placeholder="Name" required>
  <input type="email" name="email" placeholder="Email" required>
  <input type="file" name="profile_picture">
  <button type="submit">Add user</button>
</form>
<table border="1">
<tr><th>ID</th><th>Name</th><th>Email</th><th>Picture</th><th>Actions</th></tr>
{rows}</table>
</body>
</html>
"#,
        rows = rows
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32, name: &str, email: &str, picture: Option<&str>) -> User {
        User {
            id,
            name: name.into(),
            email: email.into(),
            profile_picture: picture.map(Into::into),
        }
    }

    #[test]
    fn lists_every_user() {
        let page = listing_page(&[
            user(1, "Ana", "ana@example.com", None),
            user(2, "Ben", "ben@example.com", Some("ben.png")),
        ]);
        assert!(page.contains("ana@example.com"));
        assert!(page.contains("ben@example.com"));
        assert!(page.contains(r#"src="/uploads/ben.png""#));
    }

    #[test]
    fn user_without_picture_gets_no_img_tag() {
        let page = listing_page(&[user(1, "Ana", "ana@example.com", None)]);
        assert!(!page.contains("<img"));
    }

    #[test]
    fn escapes_user_supplied_text() {
        let page = listing_page(&[user(1, "<script>", "a@b.com", None)]);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
