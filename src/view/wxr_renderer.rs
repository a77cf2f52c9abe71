use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::SiteInfo;
use crate::post::PostRecord;
use crate::text_utils::nicename;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:excerpt="http://wordpress.org/export/1.2/excerpt/" ...>
<channel>
  <title>OpenSourceBox</title>
  <link>http://opensourcebox.com</link>
  <description>OpenSourceBox Blog</description>
  <language>en-US</language>
  <wp:wxr_version>1.2</wp:wxr_version>
  <wp:base_site_url>http://opensourcebox.com</wp:base_site_url>
  <wp:base_blog_url>http://opensourcebox.com</wp:base_blog_url>
  <item>
    <title>Test</title>
    <link>http://opensourcebox.com/test/</link>
    <pubDate>Mon, 15 Jan 2024 10:00:00 +0000</pubDate>
    <dc:creator>admin</dc:creator>
    <guid isPermaLink="false">http://opensourcebox.com/?p=1</guid>
    <description/>
    <content:encoded><![CDATA[<h1>Hi</h1>]]></content:encoded>
    <excerpt:encoded><![CDATA[]]></excerpt:encoded>
    <wp:post_id>1</wp:post_id>
    ...
    <category domain="post_tag" nicename="open-source">Open Source</category>
  </item>
</channel>
</rss>
*/

const NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:excerpt", "http://wordpress.org/export/1.2/excerpt/"),
    ("xmlns:content", "http://purl.org/rss/1.0/modules/content/"),
    ("xmlns:wfw", "http://wellformedweb.org/CommentAPI/"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:wp", "http://wordpress.org/export/1.2/"),
];

const WXR_VERSION: &str = "1.2";
const LANGUAGE: &str = "en-US";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// The whole WordPress export: the site and every converted post
pub struct WxrDocument<'a> {
    pub site: &'a SiteInfo,
    pub posts: &'a [PostRecord],
}

impl<'a> WxrDocument<'a> {
    pub fn render(&self) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8"?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;

        // <rss version="2.0" xmlns:...>
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        for ns in NAMESPACES {
            rss.push_attribute(ns);
        }
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        let base_url = self.base_url();
        push_text(&mut writer, "title", &self.site.title)?;
        push_text(&mut writer, "link", &self.site.url)?;
        push_text(&mut writer, "description", &self.site.description)?;
        push_text(&mut writer, "language", LANGUAGE)?;
        push_text(&mut writer, "wp:wxr_version", WXR_VERSION)?;
        push_text(&mut writer, "wp:base_site_url", &self.site.url)?;
        push_text(&mut writer, "wp:base_blog_url", &self.site.url)?;

        for post in self.posts {
            write_item(&mut writer, base_url, post)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }

    fn base_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }
}

fn write_item(writer: &mut XmlWriter, base_url: &str, post: &PostRecord) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    push_text(writer, "title", &post.title)?;
    push_text(writer, "link", &format!("{}/{}/", base_url, post.slug))?;
    push_text(writer, "pubDate", &post.pub_date())?;
    push_text(writer, "dc:creator", &post.author)?;

    // <guid isPermaLink="false">http://opensourcebox.com/?p=1</guid>
    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::new(&format!("{}/?p={}", base_url, post.id))))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    writer.write_event(Event::Empty(BytesStart::new("description")))?;
    push_cdata(writer, "content:encoded", &post.content)?;
    push_cdata(writer, "excerpt:encoded", &post.excerpt)?;

    push_text(writer, "wp:post_id", &post.id.to_string())?;
    push_text(writer, "wp:post_date", &post.post_date())?;
    push_text(writer, "wp:post_date_gmt", &post.post_date_gmt())?;
    push_text(writer, "wp:comment_status", "open")?;
    push_text(writer, "wp:ping_status", "open")?;
    push_text(writer, "wp:post_name", &post.slug)?;
    push_text(writer, "wp:status", post.status.as_str())?;
    push_text(writer, "wp:post_parent", "0")?;
    push_text(writer, "wp:menu_order", "0")?;
    push_text(writer, "wp:post_type", "post")?;
    writer.write_event(Event::Empty(BytesStart::new("wp:post_password")))?;
    push_text(writer, "wp:is_sticky", "0")?;

    for category in &post.categories {
        push_term(writer, "category", category)?;
    }
    for tag in &post.tags {
        push_term(writer, "post_tag", tag)?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

// <category domain="post_tag" nicename="open-source">Open Source</category>
fn push_term(writer: &mut XmlWriter, domain: &str, term: &str) -> quick_xml::Result<()> {
    let nicename = nicename(term);
    let mut elem = BytesStart::new("category");
    elem.push_attribute(("domain", domain));
    elem.push_attribute(("nicename", nicename.as_str()));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(term)))?;
    writer.write_event(Event::End(BytesEnd::new("category")))?;
    Ok(())
}

fn push_text(writer: &mut XmlWriter, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// A `]]>` inside the text closes the section, so it is split across two sections
fn push_cdata(writer: &mut XmlWriter, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    let mut sections = text.split("]]>").peekable();
    let mut prefix = "";
    while let Some(section) = sections.next() {
        let section = if sections.peek().is_some() {
            format!("{}{}]]", prefix, section)
        } else {
            format!("{}{}", prefix, section)
        };
        writer.write_event(Event::CData(BytesCData::new(section.as_str())))?;
        prefix = ">";
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
